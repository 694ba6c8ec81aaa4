//! The canonical block type table.
//!
//! Feishu identifies block kinds by small integers. Several historical
//! tables disagree on the numbering; this is the one the crate supports
//! (46 codes, `2` is plain text, `31` is the table block).

use crate::constants::{
    HEADING_TYPE_FIRST, HEADING_TYPE_LAST, TABLE_CELL_TYPE_CODE, TABLE_TYPE_CODE,
};
use std::borrow::Cow;
use std::fmt;

/// Block kind, tagged by the numeric `block_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Page,
    Text,
    /// `heading1`..`heading9`, carrying the level 1..=9.
    Heading(u8),
    Bullet,
    Ordered,
    Code,
    Quote,
    Todo,
    Divider,
    Image,
    Callout,
    File,
    Video,
    Bookmark,
    View,
    Bitable,
    Mindnote,
    Docx,
    Sheet,
    Folder,
    Wiki,
    Table,
    TableCell,
    Calendar,
    Group,
    Chart,
    Poll,
    Form,
    Flow,
    MultiPerson,
    BulletSub,
    OrderedSub,
    TodoSub,
    Whiteboard,
    Chat,
    LinkCard,
    Audio,
    Unknown(i64),
}

impl BlockKind {
    /// Resolves a wire type code. Unknown codes are kept, never rejected.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Page,
            2 => Self::Text,
            HEADING_TYPE_FIRST..=HEADING_TYPE_LAST => {
                Self::Heading((code - HEADING_TYPE_FIRST + 1) as u8)
            }
            12 => Self::Bullet,
            13 => Self::Ordered,
            14 => Self::Code,
            15 => Self::Quote,
            16 => Self::Todo,
            17 => Self::Divider,
            18 => Self::Image,
            // 19 and 20 are both callouts; 31 is the real table block.
            19 | 20 => Self::Callout,
            21 => Self::File,
            22 => Self::Video,
            23 => Self::Bookmark,
            24 => Self::View,
            25 => Self::Bitable,
            26 => Self::Mindnote,
            27 => Self::Docx,
            28 => Self::Sheet,
            29 => Self::Folder,
            30 => Self::Wiki,
            TABLE_TYPE_CODE => Self::Table,
            TABLE_CELL_TYPE_CODE => Self::TableCell,
            33 => Self::Calendar,
            34 => Self::Group,
            35 => Self::Chart,
            36 => Self::Poll,
            37 => Self::Form,
            38 => Self::Flow,
            39 => Self::MultiPerson,
            40 => Self::BulletSub,
            41 => Self::OrderedSub,
            42 => Self::TodoSub,
            43 => Self::Whiteboard,
            44 => Self::Chat,
            45 => Self::LinkCard,
            46 => Self::Audio,
            other => Self::Unknown(other),
        }
    }

    /// Type name as reported in summaries (`unknown_{code}` for unknown codes).
    pub fn name(&self) -> Cow<'static, str> {
        let name = match self {
            Self::Page => "page",
            Self::Text => "text",
            Self::Heading(level) => return Cow::Owned(format!("heading{}", level)),
            Self::Bullet => "bullet",
            Self::Ordered => "ordered",
            Self::Code => "code",
            Self::Quote => "quote",
            Self::Todo => "todo",
            Self::Divider => "divider",
            Self::Image => "image",
            Self::Callout => "callout",
            Self::File => "file",
            Self::Video => "video",
            Self::Bookmark => "bookmark",
            Self::View => "view",
            Self::Bitable => "bitable",
            Self::Mindnote => "mindnote",
            Self::Docx => "docx",
            Self::Sheet => "sheet",
            Self::Folder => "folder",
            Self::Wiki => "wiki",
            Self::Table => "table",
            Self::TableCell => "table_cell",
            Self::Calendar => "calendar",
            Self::Group => "group",
            Self::Chart => "chart",
            Self::Poll => "poll",
            Self::Form => "form",
            Self::Flow => "flow",
            Self::MultiPerson => "multi_person",
            Self::BulletSub => "bullet_sub",
            Self::OrderedSub => "ordered_sub",
            Self::TodoSub => "todo_sub",
            Self::Whiteboard => "whiteboard",
            Self::Chat => "chat",
            Self::LinkCard => "link_card",
            Self::Audio => "audio",
            Self::Unknown(code) => return Cow::Owned(format!("unknown_{}", code)),
        };
        Cow::Borrowed(name)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Heading level derived from a raw type code: `code - 2` for heading codes.
pub fn heading_level(type_code: i64) -> Option<u8> {
    (HEADING_TYPE_FIRST..=HEADING_TYPE_LAST)
        .contains(&type_code)
        .then(|| (type_code - HEADING_TYPE_FIRST + 1) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_mapping() {
        assert_eq!(heading_level(3), Some(1));
        assert_eq!(heading_level(11), Some(9));
        assert_eq!(heading_level(2), None);
        assert_eq!(heading_level(12), None);
    }

    #[test]
    fn test_heading_kind_names() {
        assert_eq!(BlockKind::from_code(3), BlockKind::Heading(1));
        assert_eq!(BlockKind::from_code(7).name(), "heading5");
    }

    #[test]
    fn test_unknown_codes_get_synthetic_names() {
        assert_eq!(BlockKind::from_code(999).name(), "unknown_999");
        assert_eq!(BlockKind::from_code(0).name(), "unknown_0");
    }

    #[test]
    fn test_table_codes() {
        assert_eq!(BlockKind::from_code(31), BlockKind::Table);
        assert_eq!(BlockKind::from_code(32).name(), "table_cell");
        assert_eq!(BlockKind::from_code(19), BlockKind::Callout);
        assert_eq!(BlockKind::from_code(43).name(), "whiteboard");
    }
}
