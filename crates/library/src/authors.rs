use folio_extract::models::Author;
use std::collections::HashMap;

/// Authors keyed by exact name, iterated in the order they were first seen.
///
/// Name lookups go through a position index into the ordered list, so
/// iteration order never depends on hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authors {
    entries: Vec<Author>,
    positions: HashMap<String, usize>,
}
impl Authors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Author> {
        self.positions.get(name).map(|&index| &self.entries[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// The author called `name`, appended to the end if this is the first
    /// time the name is seen.
    pub fn get_or_insert(&mut self, name: &str) -> &mut Author {
        let index = match self.positions.get(name) {
            Some(&index) => index,
            None => {
                self.entries.push(Author::new(name));
                self.positions.insert(name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            },
        };
        &mut self.entries[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Author> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|author| author.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Authors {
    type Item = &'a Author;
    type IntoIter = std::slice::Iter<'a, Author>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
