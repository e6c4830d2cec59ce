use serde::{Deserialize, Serialize};

use library_core::{DomainError, DomainResult, Entity};

/// Book identifier. Caller-supplied and opaque; compared by exact match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for BookId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BookId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One catalog entry.
///
/// The wire shape is exactly `id`, `title`, `author`, `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    quantity: u32,
}

impl Book {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Units currently available for checkout.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `n -> n-1`, guarded by `n > 0`. Leaves the book untouched on failure.
    pub(crate) fn check_out(&mut self) -> DomainResult<()> {
        match self.quantity.checked_sub(1) {
            Some(remaining) => {
                self.quantity = remaining;
                Ok(())
            }
            None => Err(DomainError::unavailable(self.id.as_str())),
        }
    }

    /// `n -> n+1`. Unbounded apart from the counter's own range.
    pub(crate) fn check_in(&mut self) -> DomainResult<()> {
        let restocked = self.quantity.checked_add(1).ok_or_else(|| {
            DomainError::invariant(format!("quantity overflow for book `{}`", self.id))
        })?;
        self.quantity = restocked;
        Ok(())
    }
}

impl Entity for Book {
    type Id = BookId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Candidate for `Catalog::create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub quantity: u32,
}

impl NewBook {
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            quantity,
        }
    }

    /// Validate the candidate and turn it into a stored book.
    pub fn into_book(self) -> DomainResult<Book> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::validation("id cannot be empty"));
        }
        Ok(Book {
            id: self.id,
            title: self.title,
            author: self.author,
            quantity: self.quantity,
        })
    }
}
