use clap::Parser;

/// PIN-protected launcher for a personal list of applications.
///
/// Settings live in `config.toml` next to the PIN file and can be overridden
/// with `APP_LAUNCHER_<SECTION>__<KEY>` environment variables.
#[derive(Parser, Debug, Default)]
#[command(name = "app-launcher")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rejects_arguments() {
        assert!(Cli::try_parse_from(["app-launcher"]).is_ok());
        assert!(Cli::try_parse_from(["app-launcher", "apps.txt"]).is_err());
    }
}
