//! Sprite sheet
//!
//! Sprites are plain text files, one per animation (`happy.txt`,
//! `dance.txt`, ...). Frames inside a file are separated by `===`. Missing
//! files fall back to the built-in art.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use crate::errors::{PetError, Result};

/// Animation names looked up in a sprite folder.
pub const ANIMATIONS: [&str; 7] = ["dance", "fear", "happy", "regular", "sadness", "sit", "anger"];

/// Frame separator inside a sprite file.
pub const FRAME_SEPARATOR: &str = "===";

const HAPPY: &str = r"
   /\_/\
  ( ^.^ )
   > ^ <
";

const NEUTRAL: &str = r"
   /\_/\
  ( -.- )
   > ~ <
";

const SAD: &str = r"
   /\_/\
  ( ;_; )
   > . <
";

const FORGOTTEN: &str = r"
   / _ \
  (  ?  )
   >   <
";

const ANGRY: &str = r"
   /\_/\
  ( >.< )
   > x <
";

/// Loaded frames, keyed by animation name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    frames: HashMap<String, Vec<String>>,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SpriteSheet {
    /// The art compiled into the binary.
    pub fn builtin() -> Self {
        let mut frames = HashMap::new();
        for (name, art) in [
            ("happy", HAPPY),
            ("regular", NEUTRAL),
            ("sadness", SAD),
            ("fear", FORGOTTEN),
            ("anger", ANGRY),
            ("dance", HAPPY),
            ("sit", NEUTRAL),
        ] {
            frames.insert(name.to_string(), split_frames(art));
        }
        Self { frames }
    }

    /// Load every known animation from `dir`, keeping built-ins for files
    /// that are not there.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(PetError::SpriteAccessError {
                path: dir.to_path_buf(),
                message: Arc::new("not a directory".to_string()),
            });
        }

        let mut sheet = Self::builtin();
        for name in ANIMATIONS {
            let path = dir.join(format!("{name}.txt"));
            match fs::read_to_string(&path) {
                Ok(content) => {
                    let frames = split_frames(&content);
                    if !frames.is_empty() {
                        sheet.frames.insert(name.to_string(), frames);
                    }
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(sprite = name, "sprite file missing, using built-in");
                }
                Err(e) => {
                    return Err(PetError::SpriteAccessError {
                        path,
                        message: Arc::new(e.to_string()),
                    });
                }
            }
        }

        Ok(sheet)
    }

    /// Frames for `name`; unknown names get the happy face.
    pub fn frames(&self, name: &str) -> &[String] {
        self.frames
            .get(name)
            .or_else(|| self.frames.get("happy"))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Split on [`FRAME_SEPARATOR`], trimming surrounding newlines and dropping empty frames.
fn split_frames(content: &str) -> Vec<String> {
    content
        .split(FRAME_SEPARATOR)
        .map(|frame| frame.trim_matches(|c: char| c == '\n' || c == '\r').to_string())
        .filter(|frame| !frame.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_has_every_animation() {
        let sheet = SpriteSheet::builtin();
        for name in ANIMATIONS {
            assert!(!sheet.frames(name).is_empty(), "{name} missing");
        }
    }

    #[test]
    fn test_split_frames() {
        let frames = split_frames("\n(o.o)\n===\n(O.O)\n===\n\n");
        assert_eq!(frames, vec!["(o.o)".to_string(), "(O.O)".to_string()]);
    }

    #[test]
    fn test_load_overrides_and_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("dance.txt"), "\\o/\n===\n/o\\\n").unwrap();

        let sheet = SpriteSheet::load(dir.path()).unwrap();
        assert_eq!(sheet.frames("dance"), &["\\o/".to_string(), "/o\\".to_string()]);
        assert_eq!(sheet.frames("sadness"), SpriteSheet::builtin().frames("sadness"));
    }

    #[test]
    fn test_load_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = SpriteSheet::load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, PetError::SpriteAccessError { .. }));
    }

    #[test]
    fn test_unknown_name_uses_happy() {
        let sheet = SpriteSheet::builtin();
        assert_eq!(sheet.frames("moonwalk"), sheet.frames("happy"));
    }
}
