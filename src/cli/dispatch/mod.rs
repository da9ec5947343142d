use crate::cli::actions::Action;
use crate::credentials::WorkFactor;
use anyhow::{Context, Result};

/// # Errors
/// Returns an error if a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let defaults = WorkFactor::default();

    let work_factor = WorkFactor {
        memory_kib: matches
            .get_one::<u32>("argon2-memory-kib")
            .copied()
            .unwrap_or(defaults.memory_kib),
        iterations: matches
            .get_one::<u32>("argon2-iterations")
            .copied()
            .unwrap_or(defaults.iterations),
        parallelism: matches
            .get_one::<u32>("argon2-parallelism")
            .copied()
            .unwrap_or(defaults.parallelism),
    };

    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        allowed_origin: matches
            .get_one::<String>("allowed-origin")
            .cloned()
            .context("missing required argument: --allowed-origin")?,
        work_factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_defaults() -> Result<()> {
        temp_env::with_vars_unset(
            [
                "SIGNET_PORT",
                "SIGNET_ALLOWED_ORIGIN",
                "SIGNET_ARGON2_MEMORY_KIB",
                "SIGNET_ARGON2_ITERATIONS",
                "SIGNET_ARGON2_PARALLELISM",
            ],
            || {
                let matches = commands::new().get_matches_from(vec!["signet"]);
                let Action::Server {
                    port,
                    allowed_origin,
                    work_factor,
                } = handler(&matches)?;
                assert_eq!(port, 8080);
                assert_eq!(allowed_origin, "*");
                assert_eq!(work_factor, WorkFactor::default());
                Ok(())
            },
        )
    }

    #[test]
    fn test_handler_work_factor() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "signet",
            "--port",
            "9090",
            "--allowed-origin",
            "https://signet.dev",
            "--argon2-memory-kib",
            "65536",
            "--argon2-iterations",
            "3",
            "--argon2-parallelism",
            "4",
        ]);
        let Action::Server {
            port,
            allowed_origin,
            work_factor,
        } = handler(&matches)?;
        assert_eq!(port, 9090);
        assert_eq!(allowed_origin, "https://signet.dev");
        assert_eq!(
            work_factor,
            WorkFactor {
                memory_kib: 65536,
                iterations: 3,
                parallelism: 4,
            }
        );
        Ok(())
    }
}
