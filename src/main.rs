use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use concertista::{cli, config, player::VolumeChange, types::MusicLibrary, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify
    Auth,

    /// Show what is playing
    Now,

    /// Play or pause
    Toggle,

    /// Skip to the next track
    Next,

    /// Go back to the previous track
    Previous,

    /// Set the volume (0-100) or step it up or down
    Volume(VolumeOptions),

    /// List playback devices
    Devices,

    /// Transfer playback to a device
    Device(DeviceOptions),

    /// Start a random station
    #[command(subcommand)]
    Station(StationCommand),

    /// Browse the music catalog
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Choose what new stations play
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Create piece files from Spotify albums
    #[command(subcommand)]
    Piece(PieceCommand),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct VolumeOptions {
    /// Level in percent, `up` or `down`
    #[clap(value_parser = clap::value_parser!(VolumeChange), allow_hyphen_values = true)]
    change: VolumeChange,
}

#[derive(Parser, Debug, Clone)]
pub struct DeviceOptions {
    /// Device id or name
    device: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum StationCommand {
    /// Whole library or your selection, see `prefs library`
    New,

    /// All works of one composer
    Composer {
        /// Composer id or name
        composer: String,
    },

    /// A single piece
    Piece {
        /// Piece id
        id: String,
    },

    /// Search composers and pieces; plays when exactly one matches
    Search {
        query: Vec<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CatalogCommand {
    /// List composers
    Composers,

    /// List pieces
    Pieces {
        /// Only pieces of this composer (id or name)
        #[clap(long)]
        composer: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LibraryArg {
    Entire,
    Selection,
}

impl From<LibraryArg> for MusicLibrary {
    fn from(arg: LibraryArg) -> Self {
        match arg {
            LibraryArg::Entire => MusicLibrary::Entire,
            LibraryArg::Selection => MusicLibrary::Selection,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum PrefsCommand {
    /// Play the entire library or only your selection
    Library {
        #[clap(value_enum)]
        library: LibraryArg,
    },

    /// Add a piece to your selection
    Select { piece_id: String },

    /// Remove a piece from your selection
    Deselect { piece_id: String },

    /// Show your selection
    Selection,

    /// Empty your selection
    Clear,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PieceCommand {
    /// List an artist's albums
    Albums { artist_id: String },

    /// List an album's tracks
    Tracks { album_id: String },

    /// Write a piece file from album tracks
    Create {
        /// Spotify artist id, used as composer id
        #[clap(long)]
        artist: String,

        /// Spotify album id
        #[clap(long)]
        album: String,

        /// Track positions as listed by `piece tracks`, e.g. 1-4 or 2,3,5
        #[clap(long)]
        tracks: String,

        /// Piece name; defaults to the first track's name
        #[clap(long)]
        name: Option<String>,

        /// Output YAML file
        #[clap(long)]
        out: PathBuf,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Now => cli::now().await,
        Command::Toggle => cli::toggle().await,
        Command::Next => cli::next().await,
        Command::Previous => cli::previous().await,
        Command::Volume(opt) => cli::volume(opt.change).await,
        Command::Devices => cli::devices().await,
        Command::Device(opt) => cli::device(opt.device).await,

        Command::Station(cmd) => match cmd {
            StationCommand::New => cli::new_station().await,
            StationCommand::Composer { composer } => cli::composer_station(composer).await,
            StationCommand::Piece { id } => cli::piece_station(id).await,
            StationCommand::Search { query } => cli::search_station(query.join(" ")).await,
        },

        Command::Catalog(cmd) => match cmd {
            CatalogCommand::Composers => cli::composers().await,
            CatalogCommand::Pieces { composer } => cli::pieces(composer).await,
        },

        Command::Prefs(cmd) => match cmd {
            PrefsCommand::Library { library } => cli::library(library.into()).await,
            PrefsCommand::Select { piece_id } => cli::select(piece_id).await,
            PrefsCommand::Deselect { piece_id } => cli::deselect(piece_id).await,
            PrefsCommand::Selection => cli::selection().await,
            PrefsCommand::Clear => cli::clear_selection().await,
        },

        Command::Piece(cmd) => match cmd {
            PieceCommand::Albums { artist_id } => cli::albums(artist_id).await,
            PieceCommand::Tracks { album_id } => cli::tracks(album_id).await,
            PieceCommand::Create {
                artist,
                album,
                tracks,
                name,
                out,
            } => cli::create_piece(artist, album, tracks, name, out).await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
