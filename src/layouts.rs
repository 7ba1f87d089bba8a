use crate::keyboard::{Layout, Row};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownLayout {
    Qwerty,
    Dvorak,
    Colemak,
    Workman,
}

const NUMBER_ROW: (&str, &str) = ("`1234567890-=", "~!@#$%^&*()_+");

impl KnownLayout {
    // Full ANSI rows: (unshifted, shifted), top to bottom.
    pub fn get_rows(&self) -> [(&'static str, &'static str); 4] {
        match self {
            Self::Qwerty => [
                NUMBER_ROW,
                ("qwertyuiop[]\\", "QWERTYUIOP{}|"),
                ("asdfghjkl;'", "ASDFGHJKL:\""),
                ("zxcvbnm,./", "ZXCVBNM<>?"),
            ],
            Self::Dvorak => [
                ("`1234567890[]", "~!@#$%^&*(){}"),
                ("',.pyfgcrl/=\\", "\"<>PYFGCRL?+|"),
                ("aoeuidhtns-", "AOEUIDHTNS_"),
                (";qjkxbmwvz", ":QJKXBMWVZ"),
            ],
            Self::Colemak => [
                NUMBER_ROW,
                ("qwfpgjluy;[]\\", "QWFPGJLUY:{}|"),
                ("arstdhneio'", "ARSTDHNEIO\""),
                ("zxcvbkm,./", "ZXCVBKM<>?"),
            ],
            Self::Workman => [
                NUMBER_ROW,
                ("qdrwbjfup;[]\\", "QDRWBJFUP:{}|"),
                ("ashtgyneoi'", "ASHTGYNEOI\""),
                ("zxmcvkl,./", "ZXMCVKL<>?"),
            ],
        }
    }

    /// Resting keys of the eight non-thumb fingers, left pinky first.
    pub fn get_home_keys(&self) -> &'static str {
        match self {
            Self::Qwerty => "asdfjkl;",
            Self::Dvorak => "aoeuhtns",
            Self::Colemak => "arstneio",
            Self::Workman => "ashtneoi",
        }
    }

    pub fn layout(&self) -> Layout {
        let rows = self
            .get_rows()
            .iter()
            .map(|(u, s)| Row::new(u, s))
            .collect();
        // Catalog entries are fixed data covered by tests.
        Layout::new(rows, self.get_home_keys().chars().collect())
            .expect("catalog layout rows and home keys are valid")
    }
}

pub fn get_all_layouts() -> HashMap<KnownLayout, Layout> {
    let mut map = HashMap::new();
    for layout in KnownLayout::iter() {
        map.insert(layout, layout.layout());
    }
    map
}
