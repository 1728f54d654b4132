/// Query side of the repository.
///
/// Two entry points share one matching routine ([`crate::filters::matches`]):
///
/// 1. **Structured queries**: typed parameters decoded into a
///    [`crate::filters::FilterSet`] and applied with [`filter_records`].
/// 2. **Natural-language queries**: free text turned into the same
///    `FilterSet` by [`natural::translate`], a fixed list of phrase checks,
///    then applied with [`filter_by_natural_language`].
///
/// ```rust,ignore
/// let output = filter_by_natural_language(&store, "single word palindromes")?;
/// assert_eq!(output.interpreted_query.parsed_filters.word_count, Some(1));
/// ```
///
/// Both scans hold the store's read lock for the duration of one pass and
/// return owned copies, so callers never keep the lock.
pub mod engine;
pub mod natural;

pub use engine::{filter_by_natural_language, filter_records, NaturalLanguageOutput, QueryOutput};
pub use natural::{interpret, translate, InterpretedQuery};
