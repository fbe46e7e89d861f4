//! Tag module - weighted taxonomy labels attached to a course

use std::fmt;

/// Two-character taxonomy code: one category letter followed by one digit
///
/// # Examples
///
/// ```
/// use skillmap_domain::TagCode;
///
/// let code = TagCode::parse("A5").unwrap();
/// assert_eq!(code.category(), 'A');
/// assert!(TagCode::parse("a5").is_none());
/// assert!(TagCode::parse("A55").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagCode {
    letter: u8,
    digit: u8,
}

impl TagCode {
    /// Parse a code, returning `None` unless it is an uppercase ASCII letter
    /// followed by an ASCII digit
    pub fn parse(s: &str) -> Option<Self> {
        match s.as_bytes() {
            [letter, digit] if letter.is_ascii_uppercase() && digit.is_ascii_digit() => {
                Some(Self {
                    letter: *letter,
                    digit: *digit,
                })
            }
            _ => None,
        }
    }

    /// Category letter of this code
    pub fn category(&self) -> char {
        self.letter as char
    }

    /// Whether this code belongs to the given category letter
    pub fn in_category(&self, category: char) -> bool {
        self.category() == category
    }
}

impl fmt::Display for TagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter as char, self.digit as char)
    }
}

impl std::str::FromStr for TagCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tag code: {}", s))
    }
}

/// Confidence tier of a tag
///
/// Stored on disk as 0.3 (secondary) and 0.8 (primary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weight {
    /// Touched on but not a focus (0.3)
    Secondary,

    /// Clearly and substantially covered (0.8)
    Primary,
}

impl Weight {
    const TOLERANCE: f64 = 1e-6;

    /// Numeric value as persisted
    pub fn value(&self) -> f64 {
        match self {
            Weight::Secondary => 0.3,
            Weight::Primary => 0.8,
        }
    }

    /// Map a persisted number back to a weight
    ///
    /// Anything other than 0.3 or 0.8 is rejected.
    pub fn from_value(value: f64) -> Option<Self> {
        [Weight::Secondary, Weight::Primary]
            .into_iter()
            .find(|w| (w.value() - value).abs() < Self::TOLERANCE)
    }

    /// Human-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Weight::Secondary => "secondary",
            Weight::Primary => "primary",
        }
    }

    /// Parse either the name ("primary") or the number ("0.8")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Some(Weight::Primary),
            "secondary" => Some(Weight::Secondary),
            other => other.parse::<f64>().ok().and_then(Self::from_value),
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl std::str::FromStr for Weight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid weight: {}", s))
    }
}

/// A (code, weight) pair attached to one course
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag {
    /// Taxonomy code
    pub code: TagCode,

    /// Confidence tier
    pub weight: Weight,
}

impl Tag {
    /// Create a new tag
    pub fn new(code: TagCode, weight: Weight) -> Self {
        Self { code, weight }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.code, self.weight)
    }
}

/// Ordered tag list holding at most one tag per code
///
/// Insertion order is preserved so persisted files keep their layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tag set from a sequence, keeping the first tag for each code
    ///
    /// Returns the set and the tags rejected as duplicates.
    pub fn from_tags<I: IntoIterator<Item = Tag>>(tags: I) -> (Self, Vec<Tag>) {
        let mut set = Self::new();
        let mut duplicates = Vec::new();
        for tag in tags {
            if !set.insert_if_absent(tag) {
                duplicates.push(tag);
            }
        }
        (set, duplicates)
    }

    /// Append a tag unless its code is already present
    ///
    /// Returns `true` if the tag was added.
    pub fn insert_if_absent(&mut self, tag: Tag) -> bool {
        if self.contains_code(tag.code) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove the exact (code, weight) pair
    ///
    /// Removing a pair that is not present is a no-op returning `false`.
    pub fn remove(&mut self, code: TagCode, weight: Weight) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| !(t.code == code && t.weight == weight));
        self.tags.len() != before
    }

    /// Whether the exact (code, weight) pair is present
    pub fn contains(&self, code: TagCode, weight: Weight) -> bool {
        self.tags.iter().any(|t| t.code == code && t.weight == weight)
    }

    /// Whether any tag with this code is present
    pub fn contains_code(&self, code: TagCode) -> bool {
        self.tags.iter().any(|t| t.code == code)
    }

    /// Weight currently held for a code
    pub fn weight_of(&self, code: TagCode) -> Option<Weight> {
        self.tags.iter().find(|t| t.code == code).map(|t| t.weight)
    }

    /// Whether a primary tag exists in the category, ignoring `excluding`
    pub fn has_primary_in_category(&self, category: char, excluding: Option<TagCode>) -> bool {
        self.tags.iter().any(|t| {
            t.weight == Weight::Primary && t.code.in_category(category) && Some(t.code) != excluding
        })
    }

    /// All tags in a category at the given weight, in list order
    pub fn matching(&self, category: char, weight: Weight) -> Vec<Tag> {
        self.tags
            .iter()
            .filter(|t| t.weight == weight && t.code.in_category(category))
            .copied()
            .collect()
    }

    /// Iterate over tags in order
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// Tags as a slice
    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the set holds no tags
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(code: &str, weight: Weight) -> Tag {
        Tag::new(TagCode::parse(code).unwrap(), weight)
    }

    #[test]
    fn test_tag_code_parsing() {
        assert!(TagCode::parse("B3").is_some());
        assert!(TagCode::parse("E1").is_some());
        assert!(TagCode::parse("b3").is_none());
        assert!(TagCode::parse("3B").is_none());
        assert!(TagCode::parse("").is_none());
        assert!(TagCode::parse("AB").is_none());
        assert_eq!(TagCode::parse("D2").unwrap().to_string(), "D2");
    }

    #[test]
    fn test_weight_values() {
        assert_eq!(Weight::from_value(0.8), Some(Weight::Primary));
        assert_eq!(Weight::from_value(0.3), Some(Weight::Secondary));
        assert_eq!(Weight::from_value(0.5), None);
        assert_eq!(Weight::parse("primary"), Some(Weight::Primary));
        assert_eq!(Weight::parse("0.3"), Some(Weight::Secondary));
        assert_eq!(tag("A1", Weight::Primary).to_string(), "A1@0.8");
    }

    #[test]
    fn test_insert_if_absent_keeps_one_per_code() {
        let mut set = TagSet::new();
        assert!(set.insert_if_absent(tag("A5", Weight::Secondary)));
        assert!(!set.insert_if_absent(tag("A5", Weight::Primary)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.weight_of(TagCode::parse("A5").unwrap()), Some(Weight::Secondary));
    }

    #[test]
    fn test_from_tags_reports_duplicates() {
        let (set, dups) = TagSet::from_tags([
            tag("A1", Weight::Primary),
            tag("B2", Weight::Secondary),
            tag("A1", Weight::Secondary),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(dups, vec![tag("A1", Weight::Secondary)]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut set = TagSet::from_tags([tag("A1", Weight::Primary)]).0;
        let a1 = TagCode::parse("A1").unwrap();

        assert!(!set.remove(a1, Weight::Secondary));
        assert_eq!(set.len(), 1);
        assert!(set.remove(a1, Weight::Primary));
        assert!(set.is_empty());
        assert!(!set.remove(a1, Weight::Primary));
    }

    #[test]
    fn test_category_queries() {
        let set = TagSet::from_tags([
            tag("A1", Weight::Primary),
            tag("B1", Weight::Secondary),
            tag("B3", Weight::Secondary),
        ])
        .0;
        let a1 = TagCode::parse("A1").unwrap();

        assert!(set.has_primary_in_category('A', None));
        assert!(!set.has_primary_in_category('A', Some(a1)));
        assert!(!set.has_primary_in_category('B', None));
        assert_eq!(set.matching('B', Weight::Secondary).len(), 2);
    }
}
