//! Plain text renderers for games, game lists and the detail page.

use itertools::Itertools;

use crate::detail::GameDetailState;
use crate::projector::DisplayGame;
use crate::search::SearchState;

/// Number of screenshots shown on the detail page.
const MAX_SCREENSHOTS: usize = 6;

/// Number of genres shown on a game card.
const CARD_GENRES: usize = 2;

fn sections(sections: impl IntoIterator<Item = String>) -> String {
    sections
        .into_iter()
        .filter(|section| !section.is_empty())
        .join("\n\n")
}

/// Render a single game as a card.
pub fn render_card(game: &DisplayGame) -> String {
    let mut lines = vec![game.name.clone()];
    if !game.genres.is_empty() {
        lines.push(format!("  {}", game.genres.iter().take(CARD_GENRES).join(" | ")));
    }
    if let Some(developer) = game.developers.first() {
        lines.push(format!("  {developer}"));
    }
    if let Some(label) = game.rating_label {
        lines.push(format!("  {label}"));
    }
    lines.join("\n")
}

/// Render a list of games, or the loading, error or empty placeholder.
pub fn render_list(games: &[DisplayGame], loading: bool, error: Option<&str>) -> String {
    if loading {
        return "Loading games...".to_string();
    }
    if let Some(error) = error {
        return format!("Error loading games\n{error}");
    }
    if games.is_empty() {
        return "No games found\nTry adjusting your search criteria".to_string();
    }

    sections(
        std::iter::once(format!("Games ({})", games.len())).chain(games.iter().map(render_card)),
    )
}

/// Render the header above the result list.
pub fn render_search_header(state: &SearchState) -> String {
    if state.has_query() {
        let mut header = format!("Search Results for \"{}\"", state.query);
        if state.no_matches() {
            header.push_str("\nNo games found matching your search.");
        }
        header
    } else if !state.loading() {
        "Popular Games\nDiscover the most highly rated games".to_string()
    } else {
        String::new()
    }
}

/// Render the main page: header and result list.
pub fn render_search_page(state: &SearchState) -> String {
    let games = state.results.iter().map(DisplayGame::from).collect_vec();
    sections([
        render_search_header(state),
        render_list(&games, state.loading(), state.error()),
    ])
}

/// Render the detail page for `state`.
pub fn render_detail(state: &GameDetailState) -> String {
    let record = match state {
        GameDetailState::Loading => return "Loading game details...".to_string(),
        GameDetailState::Failed { message } => return format!("Error loading game\n{message}"),
        GameDetailState::NotFound(_) => {
            return "Game not found\nThe game you're looking for doesn't exist.".to_string();
        },
        GameDetailState::Loaded(record) => record,
    };
    let game = DisplayGame::from(&**record);

    let about = game
        .description
        .as_ref()
        .map(|description| format!("About This Game\n{description}"))
        .unwrap_or_default();

    let mut details = vec!["Game Details".to_string()];
    if !game.developers.is_empty() {
        details.push(format!("Developer: {}", game.developers.join(", ")));
    }
    if !game.publishers.is_empty() {
        details.push(format!("Publisher: {}", game.publishers.join(", ")));
    }
    if game.has_release_date {
        details.push(format!("Release Date: {}", game.release_date));
    }
    if !game.platforms.is_empty() {
        details.push(format!("Platforms: {}", game.platforms.join(", ")));
    }
    if let Some(metacritic) = game.metacritic {
        details.push(format!("Metacritic Score: {metacritic}/100"));
    }

    let genres = if game.genres.is_empty() {
        String::new()
    } else {
        format!("Genres\n{}", game.genres.join(", "))
    };

    let reviews = match (game.rating, game.rating_label) {
        (Some(rating), Some(label)) => format!(
            "User Reviews\n{rating:.1}/5 ({} reviews) - {label}",
            game.ratings_count
        ),
        _ => String::new(),
    };

    let playtime = game
        .playtime
        .map(|hours| format!("Average Playtime\n{hours} hours"))
        .unwrap_or_default();

    let screenshots = if game.screenshots.is_empty() {
        String::new()
    } else {
        format!(
            "Screenshots\n{}",
            game.screenshots.iter().take(MAX_SCREENSHOTS).join("\n")
        )
    };

    sections([
        game.name.clone(),
        about,
        details.join("\n"),
        genres,
        reviews,
        playtime,
        screenshots,
    ])
}
