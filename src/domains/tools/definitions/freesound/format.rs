//! Reshapes a raw Freesound search page into the tool's output.

use super::model::{FormattedResult, FormattedSound, RawSearchResponse, RawSoundRecord};

/// Longest description passed through untouched, in characters.
pub const DESCRIPTION_LIMIT: usize = 200;

const ELLIPSIS: &str = "...";

/// Attached to every sound; the server only hands out previews.
pub const DOWNLOAD_INFO: &str = "Visit the Freesound page to download the full quality file";

/// Build the client-facing result for one page of search results.
///
/// Sounds keep the order Freesound ranked them in.
pub fn format_response(query: &str, data: RawSearchResponse) -> FormattedResult {
    let has_next_page = data.has_next_page();
    let total_found = data.count;
    let results_returned = data.results.len();

    let sounds: Vec<FormattedSound> = data.results.into_iter().map(format_sound).collect();

    let note = has_next_page.then(|| {
        format!(
            "Showing first {results_returned} results. There are {total_found} total results available."
        )
    });

    let message = sounds.is_empty().then(|| {
        format!("No sounds found for '{query}'. Try different search terms or check spelling.")
    });

    FormattedResult {
        query: query.to_string(),
        total_found,
        results_returned,
        sounds,
        note,
        message,
    }
}

fn format_sound(sound: RawSoundRecord) -> FormattedSound {
    FormattedSound {
        id: sound.id,
        name: sound.name,
        duration_seconds: sound.duration,
        description: truncate_description(sound.description),
        tags: sound.tags,
        license: sound.license,
        file_type: sound.r#type,
        uploader: sound.username,
        freesound_page: sound.url,
        preview_urls: sound.previews,
        download_info: DOWNLOAD_INFO.to_string(),
    }
}

/// Cut to [`DESCRIPTION_LIMIT`] characters plus an ellipsis when longer.
pub fn truncate_description(description: String) -> String {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => {
            let mut truncated = description;
            truncated.truncate(cut);
            truncated.push_str(ELLIPSIS);
            truncated
        }
        None => description,
    }
}
