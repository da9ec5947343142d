use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("signet")
        .about("Credential registration and verification")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("SIGNET_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("allowed-origin")
                .long("allowed-origin")
                .help("Origin allowed by CORS, `*` allows any origin")
                .default_value("*")
                .env("SIGNET_ALLOWED_ORIGIN"),
        )
        .arg(
            Arg::new("argon2-memory-kib")
                .long("argon2-memory-kib")
                .help("Argon2 memory cost in KiB")
                .default_value("19456")
                .env("SIGNET_ARGON2_MEMORY_KIB")
                .value_parser(clap::value_parser!(u32).range(8..)),
        )
        .arg(
            Arg::new("argon2-iterations")
                .long("argon2-iterations")
                .help("Argon2 time cost (passes over memory)")
                .default_value("2")
                .env("SIGNET_ARGON2_ITERATIONS")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("argon2-parallelism")
                .long("argon2-parallelism")
                .help("Argon2 degree of parallelism")
                .default_value("1")
                .env("SIGNET_ARGON2_PARALLELISM")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("SIGNET_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "signet");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Credential registration and verification"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_port_and_origin() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "signet",
            "--port",
            "8080",
            "--allowed-origin",
            "https://signet.dev",
        ]);

        assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(8080));
        assert_eq!(
            matches
                .get_one::<String>("allowed-origin")
                .map(|s| s.to_string()),
            Some("https://signet.dev".to_string())
        );
    }

    #[test]
    fn test_work_factor_rejects_zero() {
        for (arg, value) in [
            ("--argon2-iterations", "0"),
            ("--argon2-parallelism", "0"),
            ("--argon2-memory-kib", "4"),
        ] {
            let result = new().try_get_matches_from(vec!["signet", arg, value]);
            assert!(result.is_err(), "{arg}={value} should be rejected");
        }
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("SIGNET_PORT", Some("443")),
                ("SIGNET_ALLOWED_ORIGIN", Some("https://signet.dev")),
                ("SIGNET_ARGON2_MEMORY_KIB", Some("65536")),
                ("SIGNET_ARGON2_ITERATIONS", Some("3")),
                ("SIGNET_ARGON2_PARALLELISM", Some("2")),
                ("SIGNET_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["signet"]);
                assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(443));
                assert_eq!(
                    matches
                        .get_one::<String>("allowed-origin")
                        .map(|s| s.to_string()),
                    Some("https://signet.dev".to_string())
                );
                assert_eq!(
                    matches.get_one::<u32>("argon2-memory-kib").map(|s| *s),
                    Some(65536)
                );
                assert_eq!(
                    matches.get_one::<u32>("argon2-iterations").map(|s| *s),
                    Some(3)
                );
                assert_eq!(
                    matches.get_one::<u32>("argon2-parallelism").map(|s| *s),
                    Some(2)
                );
                assert_eq!(matches.get_one::<u8>("verbosity").map(|s| *s), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("SIGNET_LOG_LEVEL", Some(level))], || {
                let command = new();
                let matches = command.get_matches_from(vec!["signet"]);
                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("SIGNET_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["signet".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }
}
