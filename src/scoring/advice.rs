//! Static per-stage recommendations and 90-day action plans.
//!
//! Both lookups take the respondent's weaknesses so that personalised advice
//! can be added later without changing callers. The tables do not use them yet.

use super::stage::Stage;

const RECOMMENDATIONS: [[&str; 5]; 5] = [
    [
        "Formalize sua prática com CNPJ e estrutura legal básica",
        "Defina seu nicho e público-alvo com clareza",
        "Crie presença digital básica (site ou página profissional)",
        "Estabeleça processos simples de agendamento e atendimento",
        "Invista em formação clínica e supervisão",
    ],
    [
        "Implemente sistemas de gestão (software de agendamento e prontuário)",
        "Documente seus processos operacionais",
        "Desenvolva estratégia de marketing consistente",
        "Separe completamente finanças pessoais e profissionais",
        "Construa rede de encaminhadores",
    ],
    [
        "Diversifique suas fontes de receita (grupos, supervisão, produtos digitais)",
        "Prepare-se para liderar uma equipe",
        "Otimize sua precificação e margem de lucro",
        "Invista em marketing avançado (tráfego pago, funil de vendas)",
        "Desenvolva mentalidade empreendedora",
    ],
    [
        "Recrute e treine profissionais para sua equipe",
        "Implemente cultura organizacional clara",
        "Delegue tarefas operacionais",
        "Foque em gestão estratégica e liderança",
        "Expanda presença de marca (autoridade, palestras, publicações)",
    ],
    [
        "Planeje expansão geográfica ou novas unidades",
        "Crie produtos escaláveis (cursos online, assinaturas)",
        "Desenvolva sucessão e autonomia da operação",
        "Invista em inovação e diferenciação",
        "Construa legado e impacto de longo prazo",
    ],
];

const ACTION_PLANS: [[&str; 6]; 5] = [
    [
        "Semana 1-2: Abrir CNPJ e regularizar documentação",
        "Semana 3-4: Criar presença digital básica (perfil profissional ou site simples)",
        "Semana 5-6: Definir nicho e público-alvo específico",
        "Semana 7-8: Estabelecer processo de captação de primeiros clientes",
        "Semana 9-10: Implementar sistema básico de agendamento",
        "Semana 11-12: Buscar supervisão clínica e formação continuada",
    ],
    [
        "Semana 1-2: Implementar software de gestão (agendamento + prontuário)",
        "Semana 3-4: Documentar processos operacionais principais",
        "Semana 5-6: Criar calendário de conteúdo para redes sociais",
        "Semana 7-8: Separar finanças e criar controle de fluxo de caixa",
        "Semana 9-10: Mapear e ativar rede de encaminhadores",
        "Semana 11-12: Fazer curso de gestão de consultório",
    ],
    [
        "Semana 1-2: Analisar precificação e reajustar valores",
        "Semana 3-4: Criar primeiro produto/serviço adicional (grupo ou supervisão)",
        "Semana 5-6: Implementar funil de marketing digital",
        "Semana 7-8: Testar tráfego pago (Google Ads ou Instagram Ads)",
        "Semana 9-10: Fazer curso de liderança e gestão de pessoas",
        "Semana 11-12: Planejar contratação de primeiro profissional",
    ],
    [
        "Semana 1-2: Recrutar e contratar primeiro(s) profissional(is)",
        "Semana 3-4: Implementar processo de onboarding e treinamento",
        "Semana 5-6: Definir cultura organizacional e valores da clínica",
        "Semana 7-8: Delegar tarefas operacionais para equipe ou assistente",
        "Semana 9-10: Focar em estratégia de expansão de marca",
        "Semana 11-12: Planejar segunda unidade ou expansão de serviços",
    ],
    [
        "Semana 1-2: Mapear oportunidades de expansão geográfica",
        "Semana 3-4: Desenvolver primeiro produto digital escalável",
        "Semana 5-6: Implementar sistema de gestão de múltiplas unidades",
        "Semana 7-8: Criar plano de sucessão e autonomia operacional",
        "Semana 9-10: Investir em inovação (novas modalidades, tecnologias)",
        "Semana 11-12: Definir legado e impacto de longo prazo",
    ],
];

/// Recommendations for a stage (5 items)
pub fn recommendations(stage: Stage, _weaknesses: &[String]) -> Vec<String> {
    RECOMMENDATIONS[stage.number() as usize - 1]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// 90-day action plan for a stage (6 items, two weeks each)
pub fn action_plan(stage: Stage, _weaknesses: &[String]) -> Vec<String> {
    ACTION_PLANS[stage.number() as usize - 1]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
