use snake_arcade::client::GameClient;
use snake_arcade::config::Config;

// Single-threaded runtime: the tick loop, the bonus spawner and the color
// cycler cooperate on one scheduler, yielding once per tick.
#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    // The alternate screen owns stdout; keep log output on stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    let mut client = GameClient::new(config.api_url)?;
    client.run().await
}
