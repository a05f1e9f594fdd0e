use clap::{Parser, Subcommand};
use std::path::PathBuf;

use diagnostico::answers::{get_answers_path, AnswerSet, AnswerStore, JsonFileStore};
use diagnostico::catalog::{load_catalog, validate_catalog, Catalog};
use diagnostico::config::{load_config, validate_config, Config};
use diagnostico::interactive::{parse_answer, run_questionnaire, Outcome, Prompter};
use diagnostico::output::{self, format_percentage};
use diagnostico::progress::{overall_progress, ready_for_result};
use diagnostico::scoring::calculate_result;
use diagnostico::session::Session;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;
const EXIT_NOT_ENOUGH_ANSWERS: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Responder o questionário interativamente (padrão sem subcomando)
    Run,
    /// Listar perguntas e respostas registradas
    Questions {
        /// Mostrar apenas esta seção
        #[arg(short, long)]
        section: Option<u32>,
    },
    /// Registrar uma resposta
    Answer {
        /// Id da pergunta, como mostrado por `questions`
        id: u32,
        /// Número ou valor da opção, número da escala ou texto livre
        value: String,
    },
    /// Mostrar o progresso por seção
    Progress,
    /// Mostrar o resultado do diagnóstico
    Result {
        /// Imprimir o resultado em JSON
        #[arg(long)]
        json: bool,
        /// Mostrar o resultado mesmo abaixo do mínimo de respostas
        #[arg(long)]
        force: bool,
    },
    /// Apagar todas as respostas registradas
    Reset {
        /// Não pedir confirmação
        #[arg(short, long)]
        yes: bool,
    },
    /// Verificar a configuração e o catálogo de perguntas
    Validate,
}

#[derive(Parser, Debug)]
#[command(name = "diagnostico")]
#[command(about = "Diagnóstico de maturidade do negócio para consultórios", long_about = None)]
#[command(version)]
struct Cli {
    /// Ativar logs detalhados
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Caminho do arquivo de configuração (padrão: ~/.config/diagnostico/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn load_checked_catalog(config: &Config) -> Catalog {
    let catalog = match &config.catalog_path {
        Some(path) => load_catalog(path),
        None => Catalog::builtin(),
    };
    let catalog = match catalog {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Erro no catálogo: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = validate_catalog(&catalog) {
        eprintln!("Erros no catálogo:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    log::debug!(
        "Loaded catalog with {} questions in {} sections",
        catalog.len(),
        catalog.total_sections()
    );
    catalog
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Run);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Erro de configuração: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = validate_config(&config) {
        eprintln!("Erros de configuração:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let catalog = load_checked_catalog(&config);
    let store = JsonFileStore::new(config.answers_path.clone().unwrap_or_else(get_answers_path));
    log::debug!("Answer store at {}", store.path().display());

    let threshold = config.effective_min_result_progress();
    let use_colors = output::should_use_colors();

    match command {
        Commands::Run => {
            let mut session = match Session::open(&catalog, store) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Falha ao carregar as respostas: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            let mut prompter = Prompter::stdio();
            let outcome = match run_questionnaire(&mut session, &mut prompter, use_colors) {
                Ok(o) => o,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            println!();
            match outcome {
                Outcome::Completed if ready_for_result(session.overall_progress(), threshold) => {
                    println!("{}", output::format_report(&session.result(), use_colors));
                }
                Outcome::Completed => {
                    println!(
                        "Questionário concluído com {} respondido. Responda pelo menos {} para ver o resultado.",
                        format_percentage(session.overall_progress()),
                        format_percentage(threshold)
                    );
                }
                Outcome::Quit => {
                    println!("Respostas salvas. Execute `diagnostico run` para continuar.");
                }
            }
        }
        Commands::Questions { section } => {
            let answers = load_answers_or_exit(&store);
            println!(
                "{}",
                output::format_question_list(&catalog, &answers, section, use_colors)
            );
        }
        Commands::Answer { id, value } => {
            let Some(question) = catalog.question(id) else {
                eprintln!("A pergunta {} não existe.", id);
                std::process::exit(EXIT_INPUT);
            };
            let answer = match parse_answer(question, &value) {
                Ok(a) => a,
                Err(message) => {
                    eprintln!("{}", message);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let mut answers = load_answers_or_exit(&store);
            answers.set(id, answer);
            if let Err(e) = store.save(&answers) {
                eprintln!("Falha ao salvar as respostas: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!(
                "Resposta registrada. {} concluído.",
                format_percentage(overall_progress(&catalog, &answers))
            );
        }
        Commands::Progress => {
            let answers = load_answers_or_exit(&store);
            println!("{}", output::format_progress(&catalog, &answers, use_colors));
        }
        Commands::Result { json, force } => {
            let answers = load_answers_or_exit(&store);
            let progress = overall_progress(&catalog, &answers);
            if !force && !ready_for_result(progress, threshold) {
                eprintln!(
                    "Apenas {} do questionário foi respondido; são necessários pelo menos {} para ver o resultado.",
                    format_percentage(progress),
                    format_percentage(threshold)
                );
                eprintln!("Execute `diagnostico run` para continuar, ou use --force.");
                std::process::exit(EXIT_NOT_ENOUGH_ANSWERS);
            }

            let result = calculate_result(&catalog, &answers);
            log::debug!(
                "Scored {} answers: total {} ({})",
                answers.len(),
                result.total_score,
                result.stage
            );

            if json {
                match output::format_json(&result) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            } else {
                println!("{}", output::format_report(&result, use_colors));
            }
        }
        Commands::Reset { yes } => {
            if !yes {
                let mut prompter = Prompter::stdio();
                match prompter.ask_yes_no("Apagar todas as respostas?", false) {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("Nada foi apagado.");
                        std::process::exit(EXIT_SUCCESS);
                    }
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            }
            if let Err(e) = store.clear() {
                eprintln!("Falha ao apagar as respostas: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Respostas apagadas.");
        }
        Commands::Validate => {
            // Config and catalog were already checked above
            println!(
                "Catálogo válido: {} perguntas em {} seções.",
                catalog.len(),
                catalog.total_sections()
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn load_answers_or_exit(store: &JsonFileStore) -> AnswerSet {
    match store.load() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Falha ao carregar as respostas: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}
