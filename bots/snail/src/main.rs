use lightcycle::prelude::*;
use lightcycle::ConfigError;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const USAGE: &str = "usage: snail [name] [password] [host] [port]";

/// Layers positional `name password host port` arguments over `config`.
/// Missing trailing arguments keep the existing value.
fn apply_args<I>(mut config: ClientConfig, args: I) -> Result<ClientConfig, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    if let Some(name) = args.next() {
        config.name = name;
    }
    if let Some(password) = args.next() {
        config.password = password;
    }
    if let Some(host) = args.next() {
        config.host = host;
    }
    if let Some(port) = args.next() {
        config.port = lightcycle::parse_port(&port)?;
    }
    if let Some(extra) = args.next() {
        return Err(ConfigError::Invalid(format!("unexpected argument {extra:?}")));
    }
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), LightcycleError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::default()
        .merge_env()
        .and_then(|c| apply_args(c, std::env::args().skip(1)))
        .inspect_err(|e| error!(error = %e, "{USAGE}"))?;

    let mut client = ClientBuilder::new()
        .config(config)
        .connect(Snail::new())
        .await?;
    match client.play().await? {
        Outcome::Win { wins, losses } => info!(wins, losses, "we won"),
        Outcome::Lose { wins, losses } => info!(wins, losses, "we lost"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_args_override_config() {
        let base = ClientConfig::new("env-name", "env-pw");
        let cfg = apply_args(base, args(&["snail", "pw", "tron.local", "4321"])).unwrap();
        assert_eq!(cfg.name, "snail");
        assert_eq!(cfg.password, "pw");
        assert_eq!(cfg.host, "tron.local");
        assert_eq!(cfg.port, 4321);
    }

    #[test]
    fn test_missing_args_keep_config() {
        let base = ClientConfig::new("env-name", "env-pw");
        let cfg = apply_args(base.clone(), args(&["snail"])).unwrap();
        assert_eq!(cfg.name, "snail");
        assert_eq!(cfg.password, "env-pw");
        assert_eq!(cfg.host, base.host);
        assert_eq!(cfg.port, base.port);
    }

    #[test]
    fn test_args_rejected() {
        let base = ClientConfig::default();
        assert_eq!(
            apply_args(base.clone(), args(&[])),
            Err(ConfigError::Missing("name"))
        );
        assert!(matches!(
            apply_args(base.clone(), args(&["a", "b", "c", "port"])),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            apply_args(base, args(&["a", "b", "c", "1", "extra"])),
            Err(ConfigError::Invalid(_))
        ));
    }

    // ---------------------------------------------------------------
    // Full match against a scripted server on a real socket:
    // join, one tick on a 5x5 board, then lose.
    // ---------------------------------------------------------------
    #[tokio::test]
    async fn test_plays_one_match_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (read, mut write) = stream.into_split();
            let mut lines = BufReader::new(read).lines();
            let mut received = Vec::new();

            received.push(lines.next_line().await.unwrap().unwrap());
            let lobby = b"game|5|5\nplayer|1|rival\nplayer|2|snail\npos|1|0|0\npos|2|2|2\ntick\n";
            write.write_all(lobby).await.unwrap();
            received.push(lines.next_line().await.unwrap().unwrap());
            write.write_all(b"lose|0|1\n").await.unwrap();

            // Client closes after the outcome.
            assert!(lines.next_line().await.unwrap().is_none());
            received
        });

        let mut client = ClientBuilder::new()
            .name("snail")
            .password("pw")
            .port(port)
            .connect(Snail::new())
            .await
            .unwrap();
        let outcome = client.play().await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Lose {
                wins: 0,
                losses: 1,
            }
        );
        assert_eq!(client.state().self_id(), Some(PlayerId(2)));
        assert!(!client.connection().is_open());

        let received = server.await.unwrap();
        assert_eq!(received[0], "join|snail|pw");
        let dir = received[1]
            .strip_prefix("move|")
            .expect("should answer tick with a move");
        assert!(dir.parse::<Direction>().is_ok());
    }
}
