//! Filter predicate trees over the catalog table's composite key.
//!
//! The builders here produce a [`FilterExpression`]: a tagged predicate tree
//! plus the placeholder bindings it references. Literal values never appear
//! in the rendered expression, only in the bindings. The same tree can be
//! rendered for DynamoDB (`FilterExpression` + `ExpressionAttributeValues`)
//! or evaluated in-process against an [`ItemKey`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::keys::{self, ItemKey, MOVIE_PREFIX, PARTITION_ATTR, SORT_ATTR};

pub const MOVIE_PK_PLACEHOLDER: &str = ":moviePK";
pub const ACTOR_PK_PLACEHOLDER: &str = ":actorPK";
pub const AWARD_BODY_PLACEHOLDER: &str = ":awardBody";
pub const MOVIE_PREFIX_PLACEHOLDER: &str = ":moviePrefix";
pub const PARTITION_PLACEHOLDER: &str = ":partition";

/// Key attribute a condition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyField {
    Partition,
    Sort,
}

impl KeyField {
    /// Attribute name in the stored item.
    pub fn attribute_name(self) -> &'static str {
        match self {
            Self::Partition => PARTITION_ATTR,
            Self::Sort => SORT_ATTR,
        }
    }

    fn value_of(self, key: &ItemKey) -> &str {
        match self {
            Self::Partition => &key.partition,
            Self::Sort => &key.sort,
        }
    }
}

/// Comparison applied by a leaf condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    BeginsWith,
    Equals,
}

/// A single leaf comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub field: KeyField,
    pub op: Operator,
    pub value: String,
    pub placeholder: &'static str,
}

impl Condition {
    pub fn begins_with(field: KeyField, placeholder: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            op: Operator::BeginsWith,
            value: value.into(),
            placeholder,
        }
    }

    pub fn equals(field: KeyField, placeholder: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            op: Operator::Equals,
            value: value.into(),
            placeholder,
        }
    }

    fn matches(&self, key: &ItemKey) -> bool {
        let actual = self.field.value_of(key);
        match self.op {
            Operator::BeginsWith => actual.starts_with(self.value.as_str()),
            Operator::Equals => actual == self.value,
        }
    }

    fn render(&self) -> String {
        let attr = self.field.attribute_name();
        match self.op {
            Operator::BeginsWith => format!("begins_with({attr}, {})", self.placeholder),
            Operator::Equals => format!("{attr} = {}", self.placeholder),
        }
    }
}

/// Boolean predicate tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Leaf(Condition),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Conjunction. A single term degenerates to the term itself.
    pub fn all(mut terms: Vec<Predicate>) -> Self {
        if terms.len() == 1 {
            return terms.remove(0);
        }
        Self::And(terms)
    }

    /// Disjunction. A single term degenerates to the term itself.
    pub fn any(mut terms: Vec<Predicate>) -> Self {
        if terms.len() == 1 {
            return terms.remove(0);
        }
        Self::Or(terms)
    }

    /// Evaluates the predicate against an item key.
    ///
    /// An empty `And` is true and an empty `Or` is false.
    pub fn matches(&self, key: &ItemKey) -> bool {
        match self {
            Self::Leaf(condition) => condition.matches(key),
            Self::And(terms) => terms.iter().all(|t| t.matches(key)),
            Self::Or(terms) => terms.iter().any(|t| t.matches(key)),
        }
    }

    /// Renders the tree as a DynamoDB filter expression.
    pub fn render(&self) -> String {
        match self {
            Self::Leaf(condition) => condition.render(),
            Self::And(terms) => render_group(terms, " AND "),
            Self::Or(terms) => render_group(terms, " OR "),
        }
    }

    /// Leaf conditions in left-to-right order.
    pub fn conditions(&self) -> Vec<&Condition> {
        let mut out = Vec::new();
        self.collect_conditions(&mut out);
        out
    }

    fn collect_conditions<'a>(&'a self, out: &mut Vec<&'a Condition>) {
        match self {
            Self::Leaf(condition) => out.push(condition),
            Self::And(terms) | Self::Or(terms) => {
                for term in terms {
                    term.collect_conditions(out);
                }
            }
        }
    }

    fn is_group(&self) -> bool {
        !matches!(self, Self::Leaf(_))
    }
}

impl From<Condition> for Predicate {
    fn from(condition: Condition) -> Self {
        Self::Leaf(condition)
    }
}

fn render_group(terms: &[Predicate], separator: &str) -> String {
    terms
        .iter()
        .map(|term| {
            if term.is_group() {
                format!("({})", term.render())
            } else {
                term.render()
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// A predicate tree together with its placeholder bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterExpression {
    pub predicate: Predicate,
    pub bindings: BTreeMap<String, String>,
}

impl FilterExpression {
    pub fn new(predicate: Predicate) -> Self {
        let bindings = predicate
            .conditions()
            .into_iter()
            .map(|c| (c.placeholder.to_string(), c.value.clone()))
            .collect();
        Self {
            predicate,
            bindings,
        }
    }

    /// Rendered filter expression string.
    pub fn expression(&self) -> String {
        self.predicate.render()
    }

    pub fn matches(&self, key: &ItemKey) -> bool {
        self.predicate.matches(key)
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Query parameters of an award lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardQuery {
    #[serde(default)]
    pub movie_id: Option<String>,
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub award_body: Option<String>,
}

impl AwardQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie_id(mut self, movie_id: impl Into<String>) -> Self {
        self.movie_id = Some(movie_id.into());
        self
    }

    pub fn with_actor_id(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    pub fn with_award_body(mut self, award_body: impl Into<String>) -> Self {
        self.award_body = Some(award_body.into());
        self
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Builds the award lookup filter.
///
/// Id leaves are OR-ed together unless an award body is given. With an award
/// body, all leaves are AND-ed, except when both ids are present, in which
/// case the result is `(movie OR actor) AND awardBody`.
pub fn build_award_filter(query: &AwardQuery) -> Result<FilterExpression, ValidationError> {
    let movie_id = present(&query.movie_id);
    let actor_id = present(&query.actor_id);
    let award_body = present(&query.award_body);

    if movie_id.is_none() && actor_id.is_none() && award_body.is_none() {
        return Err(ValidationError::MissingIdentifier);
    }

    let movie_leaf = movie_id
        .map(|id| {
            keys::award_partition(id).map(|pk| {
                Predicate::from(Condition::begins_with(
                    KeyField::Partition,
                    MOVIE_PK_PLACEHOLDER,
                    pk,
                ))
            })
        })
        .transpose()?;

    let actor_leaf = actor_id
        .map(|id| {
            keys::award_partition(id).map(|pk| {
                Predicate::from(Condition::begins_with(
                    KeyField::Partition,
                    ACTOR_PK_PLACEHOLDER,
                    pk,
                ))
            })
        })
        .transpose()?;

    let award_leaf = award_body.map(|body| {
        Predicate::from(Condition::begins_with(
            KeyField::Sort,
            AWARD_BODY_PLACEHOLDER,
            body,
        ))
    });

    let predicate = match (movie_leaf, actor_leaf, award_leaf) {
        (Some(movie), Some(actor), Some(award)) => {
            Predicate::all(vec![Predicate::any(vec![movie, actor]), award])
        }
        (movie, actor, Some(award)) => {
            Predicate::all(movie.into_iter().chain(actor).chain(Some(award)).collect())
        }
        (movie, actor, None) => Predicate::any(movie.into_iter().chain(actor).collect()),
    };

    Ok(FilterExpression::new(predicate))
}

/// Filter matching every Movie row.
pub fn movies_filter() -> FilterExpression {
    FilterExpression::new(
        Condition::begins_with(KeyField::Partition, MOVIE_PREFIX_PLACEHOLDER, MOVIE_PREFIX).into(),
    )
}

/// Filter matching every row of one partition.
pub fn partition_filter(partition: impl Into<String>) -> FilterExpression {
    FilterExpression::new(
        Condition::equals(KeyField::Partition, PARTITION_PLACEHOLDER, partition).into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_leaf(id: &str) -> Predicate {
        Condition::begins_with(KeyField::Partition, MOVIE_PK_PLACEHOLDER, format!("w{id}")).into()
    }

    fn actor_leaf(id: &str) -> Predicate {
        Condition::begins_with(KeyField::Partition, ACTOR_PK_PLACEHOLDER, format!("w{id}")).into()
    }

    fn award_leaf(body: &str) -> Predicate {
        Condition::begins_with(KeyField::Sort, AWARD_BODY_PLACEHOLDER, body).into()
    }

    #[test]
    fn test_no_parameters_is_rejected() {
        assert_eq!(
            build_award_filter(&AwardQuery::new()).unwrap_err(),
            ValidationError::MissingIdentifier
        );
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let query = AwardQuery::new()
            .with_movie_id("")
            .with_actor_id("")
            .with_award_body("");
        assert_eq!(
            build_award_filter(&query).unwrap_err(),
            ValidationError::MissingIdentifier
        );

        let query = AwardQuery::new().with_movie_id("1000").with_actor_id("");
        let filter = build_award_filter(&query).unwrap();
        assert_eq!(filter.predicate, movie_leaf("1000"));
    }

    #[test]
    fn test_movie_only_degenerates_to_single_leaf() {
        let filter = build_award_filter(&AwardQuery::new().with_movie_id("1000")).unwrap();

        assert_eq!(filter.predicate, movie_leaf("1000"));
        assert_eq!(filter.expression(), "begins_with(pk, :moviePK)");
        assert_eq!(filter.bindings.get(":moviePK").unwrap(), "w1000");
        assert_eq!(filter.bindings.len(), 1);
    }

    #[test]
    fn test_movie_and_actor_are_or_combined() {
        let query = AwardQuery::new().with_movie_id("1000").with_actor_id("2000");
        let filter = build_award_filter(&query).unwrap();

        assert_eq!(
            filter.predicate,
            Predicate::Or(vec![movie_leaf("1000"), actor_leaf("2000")])
        );
        assert_eq!(
            filter.expression(),
            "begins_with(pk, :moviePK) OR begins_with(pk, :actorPK)"
        );
        assert_eq!(filter.bindings.get(":actorPK").unwrap(), "w2000");
    }

    #[test]
    fn test_movie_and_award_body_are_and_combined() {
        let query = AwardQuery::new()
            .with_movie_id("1000")
            .with_award_body("Academy");
        let filter = build_award_filter(&query).unwrap();

        assert_eq!(
            filter.predicate,
            Predicate::And(vec![movie_leaf("1000"), award_leaf("Academy")])
        );
        assert_eq!(
            filter.expression(),
            "begins_with(pk, :moviePK) AND begins_with(sk, :awardBody)"
        );
    }

    #[test]
    fn test_actor_and_award_body_are_and_combined() {
        let query = AwardQuery::new()
            .with_actor_id("2201")
            .with_award_body("BAFTA");
        let filter = build_award_filter(&query).unwrap();

        assert_eq!(
            filter.predicate,
            Predicate::And(vec![actor_leaf("2201"), award_leaf("BAFTA")])
        );
    }

    #[test]
    fn test_all_three_groups_ids_before_and() {
        let query = AwardQuery::new()
            .with_movie_id("1000")
            .with_actor_id("2000")
            .with_award_body("Academy");
        let filter = build_award_filter(&query).unwrap();

        let expected = Predicate::And(vec![
            Predicate::Or(vec![movie_leaf("1000"), actor_leaf("2000")]),
            award_leaf("Academy"),
        ]);
        assert_eq!(filter.predicate, expected);

        let naive = Predicate::And(vec![
            movie_leaf("1000"),
            actor_leaf("2000"),
            award_leaf("Academy"),
        ]);
        assert_ne!(filter.predicate, naive);

        assert_eq!(
            filter.expression(),
            "(begins_with(pk, :moviePK) OR begins_with(pk, :actorPK)) AND begins_with(sk, :awardBody)"
        );
        assert_eq!(filter.bindings.len(), 3);
    }

    #[test]
    fn test_all_three_differs_semantically_from_naive_and() {
        let query = AwardQuery::new()
            .with_movie_id("1000")
            .with_actor_id("2000")
            .with_award_body("Academy");
        let filter = build_award_filter(&query).unwrap();
        let naive = Predicate::And(vec![
            movie_leaf("1000"),
            actor_leaf("2000"),
            award_leaf("Academy"),
        ]);

        let key = ItemKey::new("w1000", "Academy");
        assert!(filter.matches(&key));
        assert!(!naive.matches(&key));
    }

    #[test]
    fn test_award_body_alone_is_accepted() {
        let filter = build_award_filter(&AwardQuery::new().with_award_body("Academy")).unwrap();

        assert_eq!(filter.predicate, award_leaf("Academy"));
        assert_eq!(filter.expression(), "begins_with(sk, :awardBody)");
    }

    #[test]
    fn test_whitespace_identifier_is_invalid_key() {
        let err = build_award_filter(&AwardQuery::new().with_movie_id("  ")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidKey(_)));
    }

    #[test]
    fn test_builder_is_deterministic() {
        let query = AwardQuery::new()
            .with_movie_id("1001")
            .with_actor_id("2100")
            .with_award_body("Golden Globe");

        let first = build_award_filter(&query).unwrap();
        let second = build_award_filter(&query).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.expression(), second.expression());
    }

    #[test]
    fn test_matches_prefix_semantics() {
        let filter = build_award_filter(&AwardQuery::new().with_movie_id("1000")).unwrap();

        assert!(filter.matches(&ItemKey::new("w1000", "Academy")));
        assert!(filter.matches(&ItemKey::new("w10001", "Academy")));
        assert!(!filter.matches(&ItemKey::new("m1000", "xxxx")));
        assert!(!filter.matches(&ItemKey::new("w1001", "Academy")));
    }

    #[test]
    fn test_movies_filter() {
        let filter = movies_filter();
        assert_eq!(filter.expression(), "begins_with(pk, :moviePrefix)");
        assert!(filter.matches(&ItemKey::new("m1000", "xxxx")));
        assert!(!filter.matches(&ItemKey::new("a2000", "xxxx")));
    }

    #[test]
    fn test_partition_filter() {
        let filter = partition_filter("c1000");
        assert_eq!(filter.expression(), "pk = :partition");
        assert!(filter.matches(&ItemKey::new("c1000", "2000")));
        assert!(!filter.matches(&ItemKey::new("c10001", "2000")));
    }

    #[test]
    fn test_empty_groups() {
        let key = ItemKey::new("m1", "xxxx");
        assert!(Predicate::And(vec![]).matches(&key));
        assert!(!Predicate::Or(vec![]).matches(&key));
    }
}
