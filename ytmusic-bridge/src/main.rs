mod auth;
mod dispatch;
mod envelope;
mod logging;
mod normalize;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use ytmusic_api::{SearchFilter, YtMusicClient, YtMusicError};

use crate::auth::AuthSources;
use crate::dispatch::{Payload, Request};
use crate::envelope::Envelope;

#[derive(Parser)]
#[command(
    name = "ytmusic-bridge",
    version,
    about = "YouTube Music queries as normalized JSON on stdout"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// OAuth token file (default: ~/.ytmusic/oauth.json)
    #[arg(long, global = true, value_name = "PATH", env = "YTMUSIC_OAUTH_FILE")]
    oauth_file: Option<PathBuf>,
    /// Browser headers file (default: ~/.ytmusic/headers_auth.json)
    #[arg(long, global = true, value_name = "PATH", env = "YTMUSIC_HEADERS_FILE")]
    headers_file: Option<PathBuf>,
    /// `__Secure-3PSID` cookie value
    #[arg(long, global = true, env = "YTMUSIC_COOKIE", hide_env_values = true)]
    cookie: Option<String>,
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Search the catalogue
    Search {
        /// Search keyword
        #[arg(short, long)]
        query: String,
        /// Result kind
        #[arg(short, long, default_value = "songs")]
        filter: FilterArg,
        /// Max results
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// List library playlists
    Playlists {
        /// Max results
        #[arg(short, long, default_value = "25")]
        limit: usize,
    },
    /// List the tracks of a playlist (`LM` = liked songs, `HISTORY` = history)
    #[command(name = "playlist_tracks")]
    PlaylistTracks {
        /// Playlist ID
        #[arg(short, long)]
        playlist_id: String,
        /// Max results
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },
    /// List liked songs
    #[command(name = "liked_songs")]
    LikedSongs {
        /// Max results
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    Songs,
    Videos,
    Playlists,
}

impl From<FilterArg> for SearchFilter {
    fn from(f: FilterArg) -> Self {
        match f {
            FilterArg::Songs => Self::Songs,
            FilterArg::Videos => Self::Videos,
            FilterArg::Playlists => Self::Playlists,
        }
    }
}

impl From<Command> for Request {
    fn from(command: Command) -> Self {
        match command {
            Command::Search {
                query,
                filter,
                limit,
            } => Self::Search {
                query,
                filter: filter.into(),
                limit,
            },
            Command::Playlists { limit } => Self::Playlists { limit },
            Command::PlaylistTracks { playlist_id, limit } => {
                Self::PlaylistTracks { playlist_id, limit }
            }
            Command::LikedSongs { limit } => Self::LikedSongs { limit },
        }
    }
}

/// Exit status when the command line does not parse.
const ARGUMENT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let (envelope, status) = match Cli::try_parse() {
        Ok(cli) => {
            logging::init(cli.verbose);
            respond(run(cli))
        }
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => argument_error(e),
    };
    print_envelope(&envelope);
    ExitCode::from(status)
}

/// Envelope and exit status for a finished command. A printed envelope
/// exits 0 either way; callers read `success` from stdout.
fn respond(result: Result<Payload>) -> (Envelope, u8) {
    (Envelope::from_result(result), 0)
}

fn argument_error(e: clap::Error) -> (Envelope, u8) {
    (Envelope::err(&anyhow::Error::new(e)), ARGUMENT_ERROR)
}

fn run(cli: Cli) -> Result<Payload> {
    let sources = AuthSources::new(cli.oauth_file, cli.headers_file, cli.cookie)?;
    let resolved = auth::resolve(&sources, chrono::Utc::now().timestamp());
    tracing::debug!(mode = %resolved.mode, "credentials resolved");

    let client =
        YtMusicClient::new(resolved.credentials).context("failed to create HTTP client")?;
    let request = Request::from(cli.command);

    dispatch::dispatch(&client, &request).map_err(|e| with_auth_hint(e, &sources))
}

/// Replace a bare "not authenticated" with one naming where credentials go.
fn with_auth_hint(e: anyhow::Error, sources: &AuthSources) -> anyhow::Error {
    if matches!(
        e.downcast_ref::<YtMusicError>(),
        Some(YtMusicError::NotAuthenticated)
    ) {
        anyhow::anyhow!(
            "not authenticated; add an OAuth token at {} or browser headers at {}",
            sources.oauth_file.display(),
            sources.headers_file.display()
        )
    } else {
        e
    }
}

fn print_envelope(envelope: &Envelope) {
    match serde_json::to_string(envelope) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            println!(r#"{{"success": false, "error": "failed to encode response"}}"#);
            tracing::error!("failed to encode envelope: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn search_defaults() {
        let cli = Cli::try_parse_from(["ytmusic-bridge", "search", "--query", "lofi"]).unwrap();
        assert_eq!(
            Request::from(cli.command),
            Request::Search {
                query: "lofi".into(),
                filter: SearchFilter::Songs,
                limit: 20,
            }
        );
    }

    #[test]
    fn underscore_command_names() {
        let cli = Cli::try_parse_from([
            "ytmusic-bridge",
            "playlist_tracks",
            "--playlist-id",
            "LM",
            "--limit",
            "5",
        ])
        .unwrap();
        assert_eq!(
            Request::from(cli.command),
            Request::PlaylistTracks {
                playlist_id: "LM".into(),
                limit: 5,
            }
        );

        let cli = Cli::try_parse_from(["ytmusic-bridge", "liked_songs"]).unwrap();
        assert_eq!(Request::from(cli.command), Request::LikedSongs { limit: 100 });
    }

    #[test]
    fn playlist_filter_and_global_flags() {
        let cli = Cli::try_parse_from([
            "ytmusic-bridge",
            "search",
            "-q",
            "x",
            "--filter",
            "playlists",
            "--headers-file",
            "/tmp/h.json",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.headers_file, Some(PathBuf::from("/tmp/h.json")));
        assert!(matches!(
            Request::from(cli.command),
            Request::Search {
                filter: SearchFilter::Playlists,
                ..
            }
        ));
    }

    fn sources() -> AuthSources {
        AuthSources {
            oauth_file: PathBuf::from("/cfg/oauth.json"),
            headers_file: PathBuf::from("/cfg/headers_auth.json"),
            cookie: None,
        }
    }

    #[test]
    fn auth_hint_names_both_files() {
        let err = with_auth_hint(YtMusicError::NotAuthenticated.into(), &sources());
        assert_eq!(
            err.to_string(),
            "not authenticated; add an OAuth token at /cfg/oauth.json \
             or browser headers at /cfg/headers_auth.json"
        );
    }

    #[test]
    fn auth_hint_sees_through_context() {
        let err = anyhow::Error::from(YtMusicError::NotAuthenticated)
            .context("failed to fetch liked songs");
        let err = with_auth_hint(err, &sources());
        assert!(err.to_string().starts_with("not authenticated; "));
        assert!(err.to_string().contains("/cfg/headers_auth.json"));
    }

    #[test]
    fn other_errors_pass_through() {
        let err = anyhow::Error::from(YtMusicError::Status {
            endpoint: "browse".into(),
            status: 403,
        })
        .context("failed to fetch library playlists");
        let err = with_auth_hint(err, &sources());
        assert_eq!(err.to_string(), "failed to fetch library playlists");
    }

    #[test]
    fn error_envelope_still_exits_zero() {
        let (envelope, status) = respond(Err(anyhow::anyhow!("not authenticated")));
        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("not authenticated"));
        assert_eq!(status, 0);

        let (envelope, status) = respond(Ok(Payload::Tracks(vec![])));
        assert!(envelope.success);
        assert_eq!(status, 0);
    }

    #[test]
    fn bad_arguments_exit_two() {
        let Err(e) = Cli::try_parse_from(["ytmusic-bridge", "search"]) else {
            panic!("missing --query should not parse");
        };
        let (envelope, status) = argument_error(e);
        assert!(!envelope.success);
        assert_eq!(status, 2);
    }

    #[test]
    fn missing_query_is_rejected() {
        assert!(Cli::try_parse_from(["ytmusic-bridge", "search"]).is_err());
        assert!(Cli::try_parse_from(["ytmusic-bridge", "search", "-q", "x", "-f", "albums"]).is_err());
    }
}
