use clap::{Parser, Subcommand};
use knob::ipc::{ActionName, Request, SOCKET_PATH};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "knob", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Key pressed: start a slider or open a pie menu
    Press {
        /// Action name from the glide config
        name: String,
    },
    /// Key released: stop a slider or commit the pie selection
    Release {
        /// Action name from the glide config
        name: String,
    },
    /// Close the pie menu without committing
    Hide,
}

impl From<Commands> for Request {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Press { name } => Request::Press(ActionName::new(name)),
            Commands::Release { name } => Request::Release(ActionName::new(name)),
            Commands::Hide => Request::Hide,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_request(&Request::from(cli.command))
}

fn send_request(request: &Request) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to glide daemon at {}: {}. Is glide running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("Sending '{}'", request);
    writeln!(stream, "{}", request)?;
    Ok(())
}
