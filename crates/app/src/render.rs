//! Plain-text rendering of the views

use std::fmt::Write;

use myflix_core::{Movie, UserProfile};

use crate::notify::Notice;
use crate::viewmodel::{MovieDialog, MovieListViewModel};

pub fn welcome(authenticated: bool) -> String {
    let mut out = String::from("Welcome to myFlix!\n");
    if authenticated {
        out.push_str("You are logged in. Open /movies to browse the catalog.\n");
    } else {
        out.push_str("Sign up with `myflix register` or log in with `myflix login`.\n");
    }
    out
}

pub fn movie_list(vm: &MovieListViewModel) -> String {
    let mut out = String::new();
    if vm.movies.is_empty() {
        out.push_str("No movies found.\n");
        return out;
    }

    for movie in &vm.movies {
        let star = if vm.is_favorite(&movie.id) { "★" } else { "☆" };
        let _ = writeln!(
            out,
            "{} {}  [{}]  {}",
            star,
            movie.title,
            movie.genre.name,
            MovieListViewModel::single_movie_route(movie)
        );
        if let Some(MovieDialog::Director(director)) = vm.director(&movie.id) {
            if !director.name.is_empty() {
                let _ = writeln!(out, "    directed by {}", director.name);
            }
        }
    }
    out
}

pub fn movie_detail(movie: &Movie) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", movie.title);
    if movie.featured {
        out.push_str("(featured)\n");
    }
    let _ = writeln!(out, "\n{}\n", movie.description);
    out.push_str(&dialog(&MovieDialog::Genre(movie.genre.clone())));
    out.push_str(&dialog(&MovieDialog::Director(movie.director.clone())));
    if !movie.image_path.is_empty() {
        let _ = writeln!(out, "Poster: {}", movie.image_path);
    }
    out
}

pub fn dialog(dialog: &MovieDialog) -> String {
    let mut out = String::new();
    match dialog {
        MovieDialog::Synopsis { title, description } => {
            let _ = writeln!(out, "{}\n  {}", title, description);
        }
        MovieDialog::Genre(genre) => {
            let _ = writeln!(out, "Genre: {}", genre.name);
            if !genre.description.is_empty() {
                let _ = writeln!(out, "  {}", genre.description);
            }
        }
        MovieDialog::Director(director) => {
            let _ = writeln!(out, "Director: {}", director.name);
            if !director.bio.is_empty() {
                let _ = writeln!(out, "  {}", director.bio);
            }
            match (&director.birth, &director.death) {
                (Some(birth), Some(death)) => {
                    let _ = writeln!(out, "  {} – {}", birth, death);
                }
                (Some(birth), None) => {
                    let _ = writeln!(out, "  born {}", birth);
                }
                _ => {}
            }
        }
    }
    out
}

pub fn profile(profile: &UserProfile, birthday: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Username: {}", profile.username);
    let _ = writeln!(out, "Email:    {}", profile.email);
    let _ = writeln!(out, "Birthday: {}", birthday);
    let _ = writeln!(out, "Favorites: {}", profile.favorite_movies.len());
    out
}

pub fn favorites(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return "You have no favorite movies yet.\n".to_string();
    }
    let mut out = String::new();
    for movie in movies {
        let _ = writeln!(out, "★ {}  /movies/{}", movie.title, movie.id);
    }
    out
}

pub fn notice(notice: &Notice) -> String {
    format!("» {}  [{}]", notice.message, notice.action)
}
