//! myFlix - movie catalog client
//!
//! Terminal front-end over the myFlix REST API: register, log in, browse
//! movies and manage favorites.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use myflix_core::{ClientConfig, MovieId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod notify;
mod render;
mod routes;
mod state;
mod viewmodel;

use routes::Route;
use state::AppState;
use viewmodel::{
    FavoritesViewModel, LoginForm, MovieListViewModel, Navbar, ProfileViewModel,
    RegistrationForm, SingleMovieViewModel,
};

#[derive(Parser)]
#[command(name = "myflix", version, about = "Browse the myFlix movie catalog")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the session cache
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        birthday: Option<String>,
    },
    /// Log in and remember the session
    Login { username: String, password: String },
    /// Forget the session
    Logout,
    /// Show a view: /welcome, /movies, /movies/<id>, /profile, /favorites
    Open {
        #[arg(default_value = "")]
        path: String,
    },
    /// Add a movie to the favorites, or remove it if already there
    Toggle {
        movie_id: String,
        /// View the toggle is issued from: /movies or /favorites
        #[arg(long, default_value = "/favorites")]
        from: String,
    },
    /// Show the synopsis, genre or director of a movie
    Dialog { kind: DialogKind, movie_id: String },
    /// Change username, password or email
    UpdateProfile {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete the account and log out
    DeleteAccount,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialogKind {
    Synopsis,
    Genre,
    Director,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ClientConfig::load(cli.config.as_deref())?
        .with_overrides(cli.api_url.clone(), cli.data_dir.clone());

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.log_filter.as_deref().unwrap_or("warn"))
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!(api_url = %config.api_url, "Starting myFlix");

    let runtime = tokio::runtime::Runtime::new()?;
    let state = Arc::new(AppState::new(&config)?);

    let result = runtime.block_on(run(state.clone(), cli.command));

    for notice in state.notifier.drain() {
        println!("{}", render::notice(&notice));
    }
    result
}

async fn run(state: Arc<AppState>, command: Command) -> anyhow::Result<()> {
    let mut navbar = Navbar::new(state.clone());

    match command {
        Command::Register {
            username,
            password,
            email,
            birthday,
        } => {
            let mut form = RegistrationForm::new(state);
            form.username = username;
            form.password = password;
            form.email = email.unwrap_or_default();
            form.birthday = birthday.unwrap_or_default();
            form.submit().await?;
        }
        Command::Login { username, password } => {
            let mut form = LoginForm::new(state.clone());
            form.username = username;
            form.password = password;
            let next = form.submit().await?;
            open(&state, &mut navbar, next).await?;
        }
        Command::Logout => {
            navbar.logout();
            println!("{}", render::welcome(navbar.is_authenticated()));
        }
        Command::Open { path } => {
            let route = Route::parse(&path)
                .ok_or_else(|| anyhow::anyhow!("Unknown page {:?}", path))?;
            open(&state, &mut navbar, route).await?;
        }
        Command::Toggle { movie_id, from } => {
            let id = MovieId::from(movie_id);
            match Route::parse(&from) {
                Some(Route::Movies) => {
                    let mut vm = MovieListViewModel::new(state);
                    vm.load().await?;
                    vm.toggle_favorite(&id).await?;
                    navbar.navigate(Route::Movies);
                    print!("{}", render::movie_list(&vm));
                }
                Some(Route::Favorites) => {
                    let mut vm = FavoritesViewModel::new(state);
                    vm.refresh().await?;
                    vm.toggle(&id).await?;
                    navbar.navigate(Route::Favorites);
                    print!("{}", render::favorites(&vm.movies));
                }
                _ => anyhow::bail!("Favorites can only be toggled from /movies or /favorites"),
            }
        }
        Command::Dialog { kind, movie_id } => {
            let id = MovieId::from(movie_id);
            let mut vm = MovieListViewModel::new(state);
            vm.load().await?;
            let dialog = match kind {
                DialogKind::Synopsis => vm.synopsis(&id),
                DialogKind::Genre => vm.genre(&id),
                DialogKind::Director => vm.director(&id),
            }
            .ok_or_else(|| anyhow::anyhow!("No movie with id {}", id))?;
            print!("{}", render::dialog(&dialog));
        }
        Command::UpdateProfile {
            username,
            password,
            email,
        } => {
            let mut vm = ProfileViewModel::new(state);
            vm.load().await?;
            let mut form = vm.edit_form();
            if let Some(username) = username {
                form.username = username;
            }
            if let Some(email) = email {
                form.email = email;
            }
            form.password = password;
            vm.submit_update(&form).await?;
            if let Some(profile) = &vm.profile {
                print!("{}", render::profile(profile, &vm.birthday_display()));
            }
        }
        Command::DeleteAccount => {
            let mut vm = ProfileViewModel::new(state);
            let next = vm.delete_account().await?;
            navbar.navigate(next);
            println!("{}", render::welcome(navbar.is_authenticated()));
        }
    }

    tracing::debug!(route = %navbar.current_route(), "Command finished");
    Ok(())
}

/// Render the view behind a route
async fn open(state: &Arc<AppState>, navbar: &mut Navbar, route: Route) -> anyhow::Result<()> {
    navbar.navigate(route.clone());

    match route {
        Route::Welcome => {
            print!("{}", render::welcome(navbar.is_authenticated()));
        }
        Route::Movies => {
            let mut vm = MovieListViewModel::new(state.clone());
            vm.load().await?;
            print!("{}", render::movie_list(&vm));
        }
        Route::Movie(id) => {
            let mut vm = SingleMovieViewModel::new(state.clone());
            vm.load(Some(&id)).await?;
            if let Some(movie) = &vm.movie {
                print!("{}", render::movie_detail(movie));
            }
        }
        Route::Profile => {
            let mut vm = ProfileViewModel::new(state.clone());
            vm.load().await?;
            if let Some(profile) = &vm.profile {
                print!("{}", render::profile(profile, &vm.birthday_display()));
            }
        }
        Route::Favorites => {
            let mut vm = FavoritesViewModel::new(state.clone());
            vm.refresh().await?;
            print!("{}", render::favorites(&vm.movies));
        }
    }
    Ok(())
}
