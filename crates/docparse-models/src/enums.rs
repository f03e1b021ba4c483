//! Enumerations used by the parse API.
//!
//! All of them are open on the wire: fields hold `OpenEnum<E>`, so members
//! added by the server later are kept verbatim instead of failing coercion.

use docparse_core::{EnumLiteral, WireEnum};

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl WireEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn members() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn literal(self) -> EnumLiteral {
                match self {
                    $($name::$variant => EnumLiteral::from($wire)),+
                }
            }
        }
    };
}

wire_enum!(
    /// Rendering requested for parsed content.
    OutputFormat {
        Markdown => "markdown",
        Html => "html",
        Json => "json",
        Text => "text",
    }
);

wire_enum!(
    JobStatus {
        Pending => "pending",
        Processing => "processing",
        Completed => "completed",
        Failed => "failed",
    }
);

wire_enum!(
    /// Layout role of a parsed block.
    BlockType {
        Title => "title",
        SectionHeader => "section_header",
        Text => "text",
        Table => "table",
        Figure => "figure",
        ListItem => "list_item",
        PageNumber => "page_number",
    }
);

wire_enum!(
    OcrMode {
        Auto => "auto",
        Force => "force",
        Off => "off",
    }
);

wire_enum!(
    /// Discriminator carried by every parse result.
    ResultType {
        Full => "full",
        Url => "url",
    }
);

wire_enum!(
    /// Queue priority. Integer-valued on the wire.
    Priority {
        Low => 0_i64,
        Normal => 1_i64,
        High => 2_i64,
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use docparse_core::OpenEnum;

    #[test]
    fn literals_match_wire_spelling() {
        assert_eq!(BlockType::SectionHeader.literal(), EnumLiteral::Str("section_header".into()));
        assert_eq!(Priority::High.literal(), EnumLiteral::Int(2));
    }

    #[test]
    fn open_enum_resolves_known_members() {
        assert_eq!(OpenEnum::<JobStatus>::from_literal("failed").known(), Some(JobStatus::Failed));
        assert_eq!(OpenEnum::<JobStatus>::from_literal("archived").known(), None);
        assert_eq!(OpenEnum::<Priority>::from_literal(1_i64).known(), Some(Priority::Normal));
    }
}
