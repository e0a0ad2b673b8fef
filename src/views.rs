//! Terminal rendering of the application state.
//!
//! Every function here is pure: it reads an [`UploadState`] or a
//! [`Recipe`] and returns text.

use crate::controller::UploadState;
use crate::model::Recipe;
use std::fmt::Write;

pub const TITLE: &str = "Culinary Vision";
pub const TAGLINE: &str =
    "What's in your fridge? Snap a picture, add your dietary needs, and let AI craft your next meal.";
pub const UPLOAD_HINT: &str = "PNG, JPG, GIF up to 10MB";
pub const LOADING_MESSAGE: &str = "Generating recipes...";
pub const IDLE_HINT: &str = "Ready to discover delicious recipes from your ingredients!";

/// Render the whole screen
pub fn render(state: &UploadState) -> String {
    let mut out = String::new();
    out.push_str(&render_header());
    out.push('\n');
    out.push_str(&render_form(state));
    out.push('\n');
    out.push_str(&render_results(state));
    out
}

pub fn render_header() -> String {
    format!("{}\n{}\n{}\n", TITLE, "=".repeat(TITLE.len()), TAGLINE)
}

/// Upload control, restriction input and submit control
pub fn render_form(state: &UploadState) -> String {
    let mut out = String::new();
    let disabled = if state.is_loading { " (disabled)" } else { "" };

    let _ = writeln!(out, "Upload Ingredient Photo{}", disabled);
    match &state.preview {
        Some(preview) => {
            let _ = writeln!(out, "  [image] {}", preview);
        }
        None => {
            let _ = writeln!(out, "  [no image selected]");
        }
    }
    let _ = writeln!(out, "  {}", UPLOAD_HINT);

    let _ = writeln!(out, "Dietary Restrictions (optional){}", disabled);
    if state.dietary_restrictions.trim().is_empty() {
        let _ = writeln!(out, "  e.g., vegan, gluten-free, low-carb");
    } else {
        let _ = writeln!(out, "  {}", state.dietary_restrictions.trim());
    }

    let label = if state.is_loading {
        "Generating..."
    } else {
        "Generate Recipes"
    };
    let submit_state = if state.can_submit() { "" } else { " (disabled)" };
    let _ = writeln!(out, "[ {} ]{}", label, submit_state);
    out
}

/// Loading indicator, error banner, recipe list or idle hint
pub fn render_results(state: &UploadState) -> String {
    let mut out = String::new();

    if state.is_loading {
        let _ = writeln!(out, "{}", LOADING_MESSAGE);
    }

    if let Some(error) = &state.error {
        let _ = writeln!(out, "!! {}", error);
    }

    if !state.is_loading && !state.recipes.is_empty() {
        let _ = writeln!(out, "Your Recipe Ideas");
        let _ = writeln!(out);
        let cards: Vec<String> = state.recipes.iter().map(render_recipe).collect();
        out.push_str(&cards.join("\n"));
    } else if !state.is_loading && state.error.is_none() && state.preview.is_some() {
        let _ = writeln!(out, "{}", IDLE_HINT);
    }

    out
}

/// A single recipe card
pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.name);
    let _ = writeln!(out, "{}", "-".repeat(recipe.name.chars().count()));
    let _ = writeln!(out, "Prep time: {}", recipe.prep_time);
    let _ = writeln!(out);

    let _ = writeln!(out, "Ingredients");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "  - {}", ingredient);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Instructions");
    for (index, instruction) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, instruction);
    }
    out
}
