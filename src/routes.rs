use crate::models::MemeId;

/// The two screens the app can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Listing,
    Detail(MemeId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Listing => "/".to_string(),
            Route::Detail(id) => format!("/meme/{}", id),
        }
    }

    /// Parses `/` and `/meme/{id}`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Some(Route::Listing);
        }
        let id = path.strip_prefix("/meme/")?.trim_end_matches('/');
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Route::Detail(MemeId::from(id)))
    }
}
