//! Built-in game definitions.
//!
//! Each game is a plain `Game` value assembled with the rule builders;
//! nothing here touches the engine. `builtin_library` collects them into a
//! registry keyed by name.

mod freecell;
mod klondike;
mod yukon;

pub use freecell::{eight_off, freecell};
pub use klondike::klondike;
pub use yukon::{russian, yukon};

use crate::rules::GameLibrary;

/// All built-in games, registered under their names.
#[must_use]
pub fn builtin_library() -> GameLibrary {
    let mut library = GameLibrary::new();
    library.register(klondike());
    library.register(yukon());
    library.register(russian());
    library.register(freecell());
    library.register(eight_off());
    library
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_library_names() {
        let library = builtin_library();
        assert_eq!(
            library.names(),
            vec!["eight_off", "freecell", "klondike", "russian", "yukon"]
        );
    }
}
