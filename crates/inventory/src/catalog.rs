use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use library_core::{DomainError, DomainResult, Entity};

use crate::book::{Book, BookId, NewBook};

/// The three books every fresh catalog starts with.
pub fn seed_books() -> Vec<NewBook> {
    vec![
        NewBook::new("1", "Book#1", "Author#1", 3),
        NewBook::new("2", "Book#2", "Author#2", 10),
        NewBook::new("3", "Book#3", "Author#3", 7),
    ]
}

#[derive(Debug, Default)]
struct CatalogState {
    /// Insertion order. Books are never removed, so positions are stable.
    books: Vec<Book>,
    index: HashMap<BookId, usize>,
}

impl CatalogState {
    fn insert(&mut self, book: Book) -> DomainResult<&Book> {
        if self.index.contains_key(book.id()) {
            return Err(DomainError::conflict(format!(
                "book `{}` already exists",
                book.id()
            )));
        }
        let pos = self.books.len();
        self.index.insert(book.id().clone(), pos);
        self.books.push(book);
        Ok(&self.books[pos])
    }

    fn get(&self, id: &BookId) -> Option<&Book> {
        self.index.get(id).map(|&pos| &self.books[pos])
    }

    fn get_mut(&mut self, id: &BookId) -> DomainResult<&mut Book> {
        match self.index.get(id) {
            Some(&pos) => Ok(&mut self.books[pos]),
            None => Err(DomainError::not_found(id.as_str())),
        }
    }
}

/// In-memory inventory store.
///
/// All access funnels through these operations. Mutations (`create`,
/// `checkout`, `return_book`) run their whole read-check-write sequence under
/// the write lock; reads copy out under the read lock.
///
/// Every transition is a single field write after its guard, so a panic while
/// holding the lock cannot leave a half-applied state. Poisoned locks are
/// therefore recovered instead of propagated.
#[derive(Debug, Default)]
pub struct Catalog {
    state: RwLock<CatalogState>,
}

impl Catalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with `seed_books()`.
    pub fn seeded() -> Self {
        let catalog = Self::new();
        for book in seed_books() {
            // Seed ids are distinct and non-blank.
            let _ = catalog.create(book);
        }
        catalog
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every book, in insertion order.
    pub fn list(&self) -> Vec<Book> {
        self.read().books.clone()
    }

    pub fn len(&self) -> usize {
        self.read().books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &BookId) -> DomainResult<Book> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(id.as_str()))
    }

    /// Add a book. Duplicate ids are rejected with `Conflict`.
    pub fn create(&self, candidate: NewBook) -> DomainResult<Book> {
        let book = candidate.into_book()?;
        let mut state = self.write();
        state.insert(book).cloned()
    }

    /// Take one unit. Fails with `Unavailable` at quantity 0.
    pub fn checkout(&self, id: &BookId) -> DomainResult<Book> {
        let mut state = self.write();
        let book = state.get_mut(id)?;
        book.check_out()?;
        Ok(book.clone())
    }

    /// Give one unit back. No upper bound is tracked; this acts as a restock.
    pub fn return_book(&self, id: &BookId) -> DomainResult<Book> {
        let mut state = self.write();
        let book = state.get_mut(id)?;
        book.check_in()?;
        Ok(book.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Barrier;

    fn id(s: &str) -> BookId {
        BookId::from(s)
    }

    #[test]
    fn seeded_catalog_lists_in_insertion_order() {
        let catalog = Catalog::seeded();
        let ids: Vec<_> = catalog
            .list()
            .iter()
            .map(|b| b.id().as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(catalog.get(&id("2")).unwrap().quantity(), 10);
    }

    #[test]
    fn checkout_decrements_seeded_book() {
        let catalog = Catalog::seeded();
        let book = catalog.checkout(&id("2")).unwrap();
        assert_eq!(book.quantity(), 9);
        assert_eq!(catalog.get(&id("2")).unwrap().quantity(), 9);
    }

    #[test]
    fn checkout_unknown_id_is_not_found_and_changes_nothing() {
        let catalog = Catalog::seeded();
        let before = catalog.list();

        let err = catalog.checkout(&id("999")).unwrap_err();
        assert_eq!(err, DomainError::not_found("999"));
        assert_eq!(catalog.list(), before);
    }

    #[test]
    fn checkout_until_exhausted_then_unavailable() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.checkout(&id("1")).unwrap().quantity(), 2);
        assert_eq!(catalog.checkout(&id("1")).unwrap().quantity(), 1);
        assert_eq!(catalog.checkout(&id("1")).unwrap().quantity(), 0);

        let err = catalog.checkout(&id("1")).unwrap_err();
        assert_eq!(err, DomainError::unavailable("1"));
        assert_eq!(catalog.get(&id("1")).unwrap().quantity(), 0);
    }

    #[test]
    fn return_increments() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.return_book(&id("3")).unwrap().quantity(), 8);
    }

    #[test]
    fn return_unknown_id_is_not_found() {
        let catalog = Catalog::seeded();
        assert_eq!(
            catalog.return_book(&id("999")).unwrap_err(),
            DomainError::not_found("999")
        );
    }

    #[test]
    fn create_then_get_returns_same_book() {
        let catalog = Catalog::seeded();
        let created = catalog
            .create(NewBook::new("4", "Book#4", "Author#4", 1))
            .unwrap();

        let fetched = catalog.get(&id("4")).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.quantity(), 1);
        assert_eq!(fetched.title(), "Book#4");
        assert_eq!(fetched.author(), "Author#4");
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn create_duplicate_id_is_conflict() {
        let catalog = Catalog::seeded();
        let err = catalog
            .create(NewBook::new("1", "Other", "Someone", 5))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Original entry untouched.
        let book = catalog.get(&id("1")).unwrap();
        assert_eq!(book.title(), "Book#1");
        assert_eq!(book.quantity(), 3);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn create_blank_id_is_validation_error() {
        let catalog = Catalog::new();
        let err = catalog.create(NewBook::new("", "t", "a", 1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn concurrent_checkouts_never_oversell() {
        const THREADS: usize = 32;
        const STOCK: u32 = 5;

        let catalog = Catalog::new();
        catalog
            .create(NewBook::new("hot", "Hot", "Seller", STOCK))
            .unwrap();
        let barrier = Barrier::new(THREADS);

        let results: Vec<DomainResult<Book>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        catalog.checkout(&id("hot"))
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let ok = results.iter().filter(|r| r.is_ok()).count();
        let unavailable = results
            .iter()
            .filter(|r| matches!(r, Err(DomainError::Unavailable(_))))
            .count();

        assert_eq!(ok, STOCK as usize);
        assert_eq!(unavailable, THREADS - STOCK as usize);
        assert_eq!(catalog.get(&id("hot")).unwrap().quantity(), 0);
    }

    #[test]
    fn concurrent_checkout_and_return_balance_out() {
        let catalog = Catalog::new();
        catalog.create(NewBook::new("b", "B", "A", 50)).unwrap();

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..25 {
                        catalog.checkout(&id("b")).unwrap();
                        catalog.return_book(&id("b")).unwrap();
                    }
                });
            }
        });

        assert_eq!(catalog.get(&id("b")).unwrap().quantity(), 50);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Checkout(u8),
        Return(u8),
        Create(u8, u32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..6).prop_map(Op::Checkout),
            (0u8..6).prop_map(Op::Return),
            (0u8..6, 0u32..4).prop_map(|(i, q)| Op::Create(i, q)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the catalog matches a simple model after any op sequence.
        #[test]
        fn catalog_tracks_reference_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let catalog = Catalog::seeded();
            let mut model: Vec<(String, u32)> = seed_books()
                .into_iter()
                .map(|b| (b.id.as_str().to_string(), b.quantity))
                .collect();

            for op in ops {
                match op {
                    Op::Checkout(i) => {
                        let key = i.to_string();
                        let res = catalog.checkout(&id(&key));
                        match model.iter_mut().find(|(k, _)| *k == key) {
                            None => prop_assert_eq!(res.unwrap_err(), DomainError::not_found(key)),
                            Some((_, 0)) => prop_assert_eq!(res.unwrap_err(), DomainError::unavailable(key)),
                            Some((_, q)) => {
                                *q -= 1;
                                prop_assert_eq!(res.unwrap().quantity(), *q);
                            }
                        }
                    }
                    Op::Return(i) => {
                        let key = i.to_string();
                        let res = catalog.return_book(&id(&key));
                        match model.iter_mut().find(|(k, _)| *k == key) {
                            None => prop_assert_eq!(res.unwrap_err(), DomainError::not_found(key)),
                            Some((_, q)) => {
                                *q += 1;
                                prop_assert_eq!(res.unwrap().quantity(), *q);
                            }
                        }
                    }
                    Op::Create(i, quantity) => {
                        let key = i.to_string();
                        let res = catalog.create(NewBook::new(key.as_str(), "t", "a", quantity));
                        if model.iter().any(|(k, _)| *k == key) {
                            prop_assert!(matches!(res, Err(DomainError::Conflict(_))));
                        } else {
                            prop_assert!(res.is_ok());
                            model.push((key, quantity));
                        }
                    }
                }
            }

            let listed: Vec<(String, u32)> = catalog
                .list()
                .iter()
                .map(|b| (b.id().as_str().to_string(), b.quantity()))
                .collect();
            prop_assert_eq!(listed, model);
        }

        /// Property: checkout followed by return restores the quantity.
        #[test]
        fn checkout_then_return_round_trips(quantity in 1u32..1_000) {
            let catalog = Catalog::new();
            catalog.create(NewBook::new("x", "t", "a", quantity)).unwrap();

            catalog.checkout(&id("x")).unwrap();
            let back = catalog.return_book(&id("x")).unwrap();
            prop_assert_eq!(back.quantity(), quantity);
        }
    }
}
