use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

use pokedex::catalog::ViewKind;
use pokedex::interface::{
    describe_error, display_login_outcome, display_movie_genres, display_pokemon_list,
    display_profile, display_toggle, display_type_palette, render_view,
};
use pokedex::{Pokedex, PokedexConfig};

#[derive(Debug, Parser)]
#[command(name = "pokedex", version, about = "Browse the Pokemon catalog")]
struct Cli {
    /// RON configuration file
    #[arg(long, global = true, env = "POKEDEX_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// One page of the general listing
    List {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Up to 20 Pokemon of one type
    Type { name: String },
    /// Details of a single Pokemon
    Show { id: u32 },
    /// Highest stat totals among the first 50
    Strongest {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// The first 20 of the catalog
    Popular,
    /// The curated legendary set
    Legendary,
    /// Search by id or by name within the first generation
    Search {
        #[arg(default_value = "")]
        term: String,
    },
    /// All types with their colours
    Types,
    Login { username: String, password: String },
    Logout,
    /// Session state and nickname
    Status,
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    Show,
    /// Overwrite profile fields
    Set {
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    ToggleType { name: String },
    ToggleGenre { genre: String },
    /// Use a Pokemon's artwork as the avatar
    Avatar { id: u32 },
    /// Movie genres with their colours
    Genres,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {}", e);
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, Box<dyn Error>> {
    let config = PokedexConfig::load_or_default(cli.config.as_deref())?;
    let pokedex = Pokedex::from_config(&config)?;

    let view = match cli.command {
        Command::List { limit, offset } => ViewKind::All {
            limit: limit.unwrap_or(config.page_size),
            offset,
        },
        Command::Type { name } => ViewKind::ByType(name),
        Command::Show { id } => ViewKind::ById(id),
        Command::Strongest { limit } => ViewKind::Strongest { limit },
        Command::Popular => ViewKind::Popular,
        Command::Legendary => ViewKind::Legendary,
        Command::Search { term } => {
            let found = pokedex.search(&term).await?;
            return Ok(display_pokemon_list(&format!("Search '{}'", term.trim()), &found));
        }
        Command::Types => return Ok(display_type_palette(&pokedex.profile().get())),
        Command::Login { username, password } => {
            let outcome = pokedex.session().submit(&username, &password)?;
            return Ok(format!("{}\n", display_login_outcome(outcome)));
        }
        Command::Logout => {
            pokedex.session().logout()?;
            return Ok("You have been logged out.\n".to_string());
        }
        Command::Status => {
            return Ok(match pokedex.greeting() {
                Some(nickname) => format!("Logged in as {}.\n", nickname),
                None => "Not logged in.\n".to_string(),
            });
        }
        Command::Profile(command) => return run_profile(&pokedex, command).await,
    };

    match pokedex.view(&view).await {
        Ok(pokemons) => Ok(render_view(&view, &Ok(pokemons))),
        Err(error) => Err(describe_error(&view, &error).into()),
    }
}

async fn run_profile(
    pokedex: &Pokedex,
    command: ProfileCommand,
) -> Result<String, Box<dyn Error>> {
    pokedex.session().require_auth()?;
    let profiles = pokedex.profile();

    let output = match command {
        ProfileCommand::Show => display_profile(&profiles.get()),
        ProfileCommand::Set {
            nickname,
            email,
            avatar,
        } => {
            let updated = profiles.update(|profile| {
                if let Some(nickname) = nickname {
                    profile.nickname = nickname;
                }
                if let Some(email) = email {
                    profile.email = email;
                }
                if let Some(avatar) = avatar {
                    profile.avatar = avatar;
                }
            })?;
            format!("Profile saved.\n{}", display_profile(&updated))
        }
        ProfileCommand::ToggleType { name } => {
            let name = name.to_lowercase();
            let mut selected = false;
            profiles.update(|profile| selected = profile.toggle_favorite_type(&name))?;
            format!("{}\n", display_toggle("types", &name, selected))
        }
        ProfileCommand::ToggleGenre { genre } => {
            let mut selected = false;
            profiles.update(|profile| selected = profile.toggle_movie_genre(&genre))?;
            format!("{}\n", display_toggle("movie genres", &genre, selected))
        }
        ProfileCommand::Avatar { id } => {
            let updated = pokedex.select_avatar(id).await?;
            format!("Avatar updated.\n{}", display_profile(&updated))
        }
        ProfileCommand::Genres => display_movie_genres(&profiles.get()),
    };
    Ok(output)
}
