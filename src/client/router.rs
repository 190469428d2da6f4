use dioxus::prelude::*;

use crate::client::component::{Layout, RequiresToken};
use crate::client::route::{Callback, Home, Login, NotFound};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/login")]
        Login {},

        #[route("/callback")]
        Callback {},

        #[layout(RequiresToken)]
            #[route("/?:guild_id")]
            Home { guild_id: String },
        #[end_layout]

        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl Route {
    /// Community list.
    pub fn home() -> Self {
        Route::Home {
            guild_id: String::new(),
        }
    }
}
