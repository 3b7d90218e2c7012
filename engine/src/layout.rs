//! Section layouts: fixed chrome wrapped around every page of a section.

use quip_types::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub heading: &'static str,
}

impl SectionLayout {
    #[must_use]
    pub const fn for_section(section: Section) -> Option<Self> {
        match section {
            Section::Root => None,
            Section::Posts => Some(Self { heading: "/posts" }),
        }
    }
}
