use std::collections::HashSet;

use super::types::{Catalog, Dimension, QuestionKind, OVERLOAD_QUESTION_ID};

/// Validate a question catalog.
/// Returns all validation errors at once (not just the first).
pub fn validate_catalog(catalog: &Catalog) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if catalog.is_empty() {
        errors.push("catalog: nenhuma pergunta cadastrada".to_string());
    }

    let mut seen_ids = HashSet::new();
    for (i, q) in catalog.questions().iter().enumerate() {
        if !seen_ids.insert(q.id) {
            errors.push(format!("questions[{}].id: id {} duplicado", i, q.id));
        }

        if q.section == 0 {
            errors.push(format!("questions[{}].section: as seções começam em 1", i));
        }

        match &q.kind {
            QuestionKind::Choice(options) => {
                if options.is_empty() {
                    errors.push(format!("questions[{}].kind: escolha sem opções", i));
                }
                let mut seen_values = HashSet::new();
                for (j, option) in options.iter().enumerate() {
                    if !seen_values.insert(option.value.as_str()) {
                        errors.push(format!(
                            "questions[{}].options[{}].value: valor '{}' duplicado",
                            i, j, option.value
                        ));
                    }
                    if option.points < 0.0 {
                        errors.push(format!(
                            "questions[{}].options[{}].points: não pode ser negativo",
                            i, j
                        ));
                    }
                }
            }
            QuestionKind::Scale(spec) => {
                if spec.min >= spec.max {
                    errors.push(format!(
                        "questions[{}].scale: min ({}) deve ser menor que max ({})",
                        i, spec.min, spec.max
                    ));
                }
            }
            QuestionKind::Text => {}
        }
    }

    // Sections must be numbered 1..=N without gaps, one name per section
    let sections = catalog.sections();
    for (expected, (number, _)) in (1u32..).zip(sections.iter()) {
        if *number != expected {
            errors.push(format!(
                "sections: esperada a seção {}, encontrada a {}",
                expected, number
            ));
            break;
        }
    }
    for (number, name) in &sections {
        if catalog
            .section_questions(*number)
            .iter()
            .any(|q| q.section_name != *name)
        {
            errors.push(format!(
                "sections[{}]: perguntas com nomes de seção diferentes",
                number
            ));
        }
    }

    match catalog.question(OVERLOAD_QUESTION_ID) {
        Some(q) if !matches!(q.kind, QuestionKind::Scale(_)) => errors.push(format!(
            "questions: a pergunta de sobrecarga {} deve ser de escala",
            OVERLOAD_QUESTION_ID
        )),
        Some(_) => {}
        None => errors.push(format!(
            "questions: a pergunta de sobrecarga {} não existe",
            OVERLOAD_QUESTION_ID
        )),
    }

    for dimension in Dimension::ALL {
        let from_catalog = catalog.dimension_max_from_catalog(dimension);
        if from_catalog != dimension.max_score() {
            errors.push(format!(
                "dimensions.{}: o catálogo permite {} pontos, mas o máximo fixo é {}",
                dimension.key(),
                from_catalog,
                dimension.max_score()
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
