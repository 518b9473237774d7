use clap::{Arg, Command};
use log::LevelFilter;
use mail_sentinel::api::{self, ClassifyRequest};
use mail_sentinel::model::TrainedModel;
use mail_sentinel::stats::StatEvent;
use mail_sentinel::{EngineConfig, EmailInput, StatisticsCollector, ThreatClassifier};
use std::io::Read;
use std::process;

#[tokio::main]
async fn main() {
    let matches = Command::new("mail-sentinel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Email threat classification engine")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/mail-sentinel.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("classify")
                .long("classify")
                .value_name("FILE")
                .help("Classify a JSON request from FILE (or - for stdin) and print the result")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("corpus")
                .long("corpus")
                .value_name("FILE")
                .help("Additional JSON training corpus, merged with the built-in samples"),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Classify a set of sample emails and print the results")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-signal score breakdowns")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = if std::path::Path::new(config_path).exists() {
        match EngineConfig::load_from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading configuration: {e:#}");
                process::exit(1);
            }
        }
    } else {
        log::debug!("no config file at {config_path}, using defaults");
        EngineConfig::default()
    };

    if let Some(corpus_path) = matches.get_one::<String>("corpus") {
        config.corpus_path = Some(corpus_path.clone());
    }

    if matches.get_flag("test-config") {
        match ThreatClassifier::new(config.clone()) {
            Ok(_) => {
                println!("Configuration OK");
                println!("  feature rules: {}", config.features.len());
                println!("  spam domains: {}", config.sender.spam_domains.len());
                let summary = TrainedModel::shared().summary();
                println!(
                    "  model: {} spam / {} ham samples, vocabulary {}",
                    summary.spam_samples, summary.ham_samples, summary.vocabulary_size
                );
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {e:#}");
                process::exit(1);
            }
        }
        return;
    }

    let classifier = match ThreatClassifier::new(config) {
        Ok(classifier) => classifier,
        Err(e) => {
            eprintln!("Error initializing classifier: {e:#}");
            process::exit(1);
        }
    };

    if let Some(request_path) = matches.get_one::<String>("classify") {
        classify_file(&classifier, request_path).await;
        return;
    }

    if matches.get_flag("demo") {
        run_demo(&classifier).await;
        return;
    }

    eprintln!("Nothing to do: pass --classify, --demo, --test-config, or --generate-config");
    process::exit(1);
}

fn generate_default_config(path: &str) {
    match EngineConfig::default().save_to_file(path) {
        Ok(()) => println!("Default configuration written to {path}"),
        Err(e) => {
            eprintln!("Error generating configuration: {e:#}");
            process::exit(1);
        }
    }
}

/// Read a JSON classification request from a file or stdin, classify it, and
/// print either the result or the error body as JSON.
async fn classify_file(classifier: &ThreatClassifier, path: &str) {
    let json = if path == "-" {
        let mut buffer = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
            eprintln!("Error reading stdin: {e}");
            process::exit(1);
        }
        buffer
    } else {
        match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error reading {path}: {e}");
                process::exit(1);
            }
        }
    };

    let request: ClassifyRequest = match api::parse_request(&json) {
        Ok(request) => request,
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(&err).unwrap());
            process::exit(1);
        }
    };

    match api::classify_request(classifier, request).await {
        Ok(result) => println!("{}", serde_json::to_string_pretty(&result).unwrap()),
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(&err).unwrap());
            process::exit(1);
        }
    }
}

async fn run_demo(classifier: &ThreatClassifier) {
    let samples = [
        (
            "Blatant spam",
            EmailInput {
                subject: "WINNER!! Claim your FREE prize NOW!!!".to_string(),
                sender: "promo@winner-lottery.tk".to_string(),
                content: "URGENT!!! You have won $1,000,000!!! Click here and act now to claim your free money!!!".to_string(),
                user_id: None,
            },
        ),
        (
            "Brand impersonation",
            EmailInput {
                subject: "Your PayPal account has been limited".to_string(),
                sender: "security@paypa1-alerts.com".to_string(),
                content: "We detected unusual activity. Verify your account immediately or it will be suspended: http://bit.ly/verify-now".to_string(),
                user_id: None,
            },
        ),
        (
            "Marketing email",
            EmailInput {
                subject: "This week's newsletter".to_string(),
                sender: "newsletter@retailer.com".to_string(),
                content: "Our spring sale starts Friday. Free shipping on orders over $50.".to_string(),
                user_id: None,
            },
        ),
        (
            "Routine work email",
            EmailInput {
                subject: "Team meeting moved to 3pm".to_string(),
                sender: "alice@company.com".to_string(),
                content: "Hi all, the weekly sync is moved to 3pm today, same room. Agenda unchanged.".to_string(),
                user_id: None,
            },
        ),
    ];

    let collector = StatisticsCollector::new(60);

    for (name, input) in &samples {
        let result = classifier.classify(input).await;
        collector.record_event(StatEvent::Classified {
            classification: result.classification,
            processing_time_ms: result.processing_time_ms,
        });
        println!("=== {name} ===");
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
        println!();
    }

    // Let the collector worker drain before reading the summary.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let summary = collector.summary();
    println!(
        "Processed {} emails: {} legitimate, {} questionable, {} suspicious, {} spam",
        summary.total_emails,
        summary.legitimate,
        summary.questionable,
        summary.suspicious,
        summary.spam
    );
}
