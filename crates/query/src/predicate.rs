//! Composable filter expressions over entities.
//!
//! A [`Predicate`] is an expression tree with a single named parameter
//! standing for the entity under test. Trees stay inspectable (and printable
//! through `Display`) so a storage layer can translate them instead of
//! evaluating in memory. Combining two predicates rebinds both bodies to one
//! canonical parameter, so the names chosen by their authors don't matter.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

use serde::Serialize;
use serde_json::{Number, Value as JsonValue};

use crate::error::PredicateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Param(String),
    Field(Box<Expr>, String),
    Const(JsonValue),
    Compare(Box<Expr>, CompareOp, Box<Expr>),
    /// Substring test on strings, membership test on arrays.
    Contains(Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn param(name: impl Into<String>) -> Self {
        Expr::Param(name.into())
    }

    pub fn constant(value: impl Into<JsonValue>) -> Self {
        Expr::Const(value.into())
    }

    pub fn field(self, name: impl Into<String>) -> Self {
        Expr::Field(Box::new(self), name.into())
    }

    fn compare(self, op: CompareOp, rhs: Expr) -> Self {
        Expr::Compare(Box::new(self), op, Box::new(rhs))
    }

    pub fn eq(self, rhs: Expr) -> Self {
        self.compare(CompareOp::Eq, rhs)
    }

    pub fn ne(self, rhs: Expr) -> Self {
        self.compare(CompareOp::Ne, rhs)
    }

    pub fn lt(self, rhs: Expr) -> Self {
        self.compare(CompareOp::Lt, rhs)
    }

    pub fn le(self, rhs: Expr) -> Self {
        self.compare(CompareOp::Le, rhs)
    }

    pub fn gt(self, rhs: Expr) -> Self {
        self.compare(CompareOp::Gt, rhs)
    }

    pub fn ge(self, rhs: Expr) -> Self {
        self.compare(CompareOp::Ge, rhs)
    }

    pub fn contains(self, rhs: Expr) -> Self {
        Expr::Contains(Box::new(self), Box::new(rhs))
    }

    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Replace every reference to parameter `from` with `to`.
    pub fn rebind(self, from: &str, to: &str) -> Self {
        let re = |e: Box<Expr>| Box::new(e.rebind(from, to));
        match self {
            Expr::Param(name) if name == from => Expr::Param(to.to_owned()),
            Expr::Param(_) | Expr::Const(_) => self,
            Expr::Field(inner, name) => Expr::Field(re(inner), name),
            Expr::Compare(l, op, r) => Expr::Compare(re(l), op, re(r)),
            Expr::Contains(l, r) => Expr::Contains(re(l), re(r)),
            Expr::And(l, r) => Expr::And(re(l), re(r)),
            Expr::Or(l, r) => Expr::Or(re(l), re(r)),
            Expr::Not(inner) => Expr::Not(re(inner)),
        }
    }

    /// True when parameter `name` occurs anywhere in the tree.
    pub fn mentions(&self, name: &str) -> bool {
        match self {
            Expr::Param(p) => p == name,
            Expr::Const(_) => false,
            Expr::Field(inner, _) | Expr::Not(inner) => inner.mentions(name),
            Expr::Compare(l, _, r) | Expr::Contains(l, r) | Expr::And(l, r) | Expr::Or(l, r) => {
                l.mentions(name) || r.mentions(name)
            }
        }
    }

    fn eval(&self, param: &str, entity: &JsonValue) -> Result<JsonValue, PredicateError> {
        match self {
            Expr::Param(name) if name == param => Ok(entity.clone()),
            Expr::Param(name) => Err(PredicateError::UnboundParameter(name.clone())),
            Expr::Const(v) => Ok(v.clone()),
            Expr::Field(inner, name) => Ok(match inner.eval(param, entity)? {
                JsonValue::Object(mut map) => map.remove(name).unwrap_or(JsonValue::Null),
                _ => JsonValue::Null,
            }),
            Expr::Compare(l, op, r) => {
                let (l, r) = (l.eval(param, entity)?, r.eval(param, entity)?);
                compare(&l, *op, &r).map(JsonValue::Bool)
            }
            Expr::Contains(l, r) => {
                let (l, r) = (l.eval(param, entity)?, r.eval(param, entity)?);
                let found = match (&l, &r) {
                    (JsonValue::String(hay), JsonValue::String(needle)) => hay.contains(needle.as_str()),
                    (JsonValue::Array(items), needle) => items.contains(needle),
                    (JsonValue::Null, _) => false,
                    _ => return Err(PredicateError::NotComparable(kind(&l), kind(&r))),
                };
                Ok(JsonValue::Bool(found))
            }
            Expr::And(l, r) => Ok(JsonValue::Bool(
                l.test(param, entity)? && r.test(param, entity)?,
            )),
            Expr::Or(l, r) => Ok(JsonValue::Bool(
                l.test(param, entity)? || r.test(param, entity)?,
            )),
            Expr::Not(inner) => Ok(JsonValue::Bool(!inner.test(param, entity)?)),
        }
    }

    fn test(&self, param: &str, entity: &JsonValue) -> Result<bool, PredicateError> {
        match self.eval(param, entity)? {
            JsonValue::Bool(b) => Ok(b),
            other => Err(PredicateError::NotBoolean(kind(&other))),
        }
    }
}

fn kind(v: &JsonValue) -> String {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
    .to_owned()
}

/// Integers compare exactly; `f64` is only used when a float is involved.
fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return Some(a.cmp(&b));
    }
    // One side is a negative i64, the other a u64 above i64::MAX.
    match (a.as_i64(), b.as_u64(), a.as_u64(), b.as_i64()) {
        (Some(_), Some(_), _, _) => Some(Ordering::Less),
        (_, _, Some(_), Some(_)) => Some(Ordering::Greater),
        _ => a.as_f64().zip(b.as_f64()).and_then(|(a, b)| a.partial_cmp(&b)),
    }
}

fn compare(l: &JsonValue, op: CompareOp, r: &JsonValue) -> Result<bool, PredicateError> {
    let ordering = match (l, r) {
        (JsonValue::Number(a), JsonValue::Number(b)) => compare_numbers(a, b),
        (JsonValue::String(a), JsonValue::String(b)) => Some(a.cmp(b)),
        (JsonValue::Bool(a), JsonValue::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    };

    match (op, ordering) {
        (CompareOp::Eq, Some(o)) => Ok(o == Ordering::Equal),
        (CompareOp::Ne, Some(o)) => Ok(o != Ordering::Equal),
        (CompareOp::Eq, None) => Ok(l == r),
        (CompareOp::Ne, None) => Ok(l != r),
        (CompareOp::Lt, Some(o)) => Ok(o == Ordering::Less),
        (CompareOp::Le, Some(o)) => Ok(o != Ordering::Greater),
        (CompareOp::Gt, Some(o)) => Ok(o == Ordering::Greater),
        (CompareOp::Ge, Some(o)) => Ok(o != Ordering::Less),
        (_, None) => Err(PredicateError::NotComparable(kind(l), kind(r))),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Param(name) => f.write_str(name),
            Expr::Field(inner, name) => write!(f, "{inner}.{name}"),
            Expr::Const(v) => write!(f, "{v}"),
            Expr::Compare(l, op, r) => write!(f, "({l} {} {r})", op.symbol()),
            Expr::Contains(l, r) => write!(f, "{l}.contains({r})"),
            Expr::And(l, r) => write!(f, "({l} && {r})"),
            Expr::Or(l, r) => write!(f, "({l} || {r})"),
            Expr::Not(inner) => write!(f, "!{inner}"),
        }
    }
}

/// Boolean expression over an entity of type `T`.
pub struct Predicate<T> {
    param: String,
    body: Expr,
    _entity: PhantomData<fn(&T) -> bool>,
}

/// Parameter name used by combined predicates.
pub const CANONICAL_PARAM: &str = "p";

impl<T> Predicate<T> {
    pub fn new(param: impl Into<String>, body: Expr) -> Self {
        Self {
            param: param.into(),
            body,
            _entity: PhantomData,
        }
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    pub fn body(&self) -> &Expr {
        &self.body
    }

    /// True when either side holds.
    pub fn or(self, other: Predicate<T>) -> Self {
        combine(self, other, Expr::Or)
    }

    /// True when both sides hold.
    pub fn and(self, other: Predicate<T>) -> Self {
        combine(self, other, Expr::And)
    }

    /// True when this predicate does not hold.
    pub fn negate(self) -> Self {
        let body = canonical_body(&self.param, self.body);
        Self::new(CANONICAL_PARAM, body.negate())
    }

    /// Evaluate against the serialized form of `entity`.
    ///
    /// Missing fields read as `null`.
    pub fn evaluate(&self, entity: &T) -> Result<bool, PredicateError>
    where
        T: Serialize,
    {
        let value =
            serde_json::to_value(entity).map_err(|e| PredicateError::Serialize(e.to_string()))?;
        self.body.test(&self.param, &value)
    }
}

fn combine<T>(
    left: Predicate<T>,
    right: Predicate<T>,
    join: fn(Box<Expr>, Box<Expr>) -> Expr,
) -> Predicate<T> {
    tracing::trace!(left = %left.param, right = %right.param, "rebinding predicate parameters");
    let l = canonical_body(&left.param, left.body);
    let r = canonical_body(&right.param, right.body);
    Predicate::new(CANONICAL_PARAM, join(Box::new(l), Box::new(r)))
}

/// Rebind `param` to [`CANONICAL_PARAM`].
///
/// A free reference to the canonical name is renamed first (`p'`, `p''`, ...)
/// so it stays unbound instead of being captured.
fn canonical_body(param: &str, body: Expr) -> Expr {
    if param == CANONICAL_PARAM {
        return body;
    }
    let body = if body.mentions(CANONICAL_PARAM) {
        let mut fresh = format!("{CANONICAL_PARAM}'");
        while fresh == param || body.mentions(&fresh) {
            fresh.push('\'');
        }
        tracing::trace!(free = CANONICAL_PARAM, renamed = %fresh, "renaming free parameter");
        body.rebind(CANONICAL_PARAM, &fresh)
    } else {
        body
    };
    body.rebind(param, CANONICAL_PARAM)
}

/// Free-function form of [`Predicate::or`].
pub fn or<T>(left: Predicate<T>, right: Predicate<T>) -> Predicate<T> {
    left.or(right)
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self::new(self.param.clone(), self.body.clone())
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("param", &self.param)
            .field("body", &self.body)
            .finish()
    }
}

impl<T> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.param, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Item {
        name: String,
        qty: i64,
        tags: Vec<String>,
    }

    fn item(name: &str, qty: i64) -> Item {
        Item {
            name: name.to_string(),
            qty,
            tags: vec!["new".to_string()],
        }
    }

    fn named(param: &str, name: &str) -> Predicate<Item> {
        Predicate::new(
            param,
            Expr::param(param).field("name").eq(Expr::constant(name)),
        )
    }

    fn qty_over(param: &str, n: i64) -> Predicate<Item> {
        Predicate::new(param, Expr::param(param).field("qty").gt(Expr::constant(n)))
    }

    #[test]
    fn or_rebinds_both_sides_to_one_parameter() {
        let combined = or(named("x", "lamp"), qty_over("item", 5));
        assert_eq!(combined.param(), CANONICAL_PARAM);
        assert_eq!(
            combined.to_string(),
            r#"p => ((p.name == "lamp") || (p.qty > 5))"#
        );
    }

    #[test]
    fn or_truth_table() {
        let combined = named("a", "lamp").or(qty_over("b", 5));
        assert!(combined.evaluate(&item("lamp", 1)).unwrap());
        assert!(combined.evaluate(&item("desk", 9)).unwrap());
        assert!(combined.evaluate(&item("lamp", 9)).unwrap());
        assert!(!combined.evaluate(&item("desk", 1)).unwrap());
    }

    #[test]
    fn and_and_negate() {
        let both = named("a", "lamp").and(qty_over("b", 5));
        assert!(both.evaluate(&item("lamp", 9)).unwrap());
        assert!(!both.evaluate(&item("lamp", 1)).unwrap());
        assert!(both.clone().negate().evaluate(&item("lamp", 1)).unwrap());
    }

    #[test]
    fn contains_on_strings_and_arrays() {
        let p = Predicate::<Item>::new(
            "i",
            Expr::param("i")
                .field("name")
                .contains(Expr::constant("am"))
                .and(Expr::param("i").field("tags").contains(Expr::constant("new"))),
        );
        assert!(p.evaluate(&item("lamp", 0)).unwrap());
        assert!(!p.evaluate(&item("desk", 0)).unwrap());
    }

    #[test]
    fn missing_field_reads_as_null() {
        let p = Predicate::<Item>::new("i", Expr::param("i").field("color").eq(Expr::constant(json!(null))));
        assert!(p.evaluate(&item("lamp", 0)).unwrap());
    }

    #[test]
    fn evaluation_errors() {
        let unbound = Predicate::<Item>::new("i", Expr::param("j").field("qty").gt(Expr::constant(1)));
        assert_eq!(
            unbound.evaluate(&item("lamp", 2)),
            Err(PredicateError::UnboundParameter("j".to_string()))
        );

        let mismatched = Predicate::<Item>::new("i", Expr::param("i").field("name").lt(Expr::constant(3)));
        assert!(matches!(
            mismatched.evaluate(&item("lamp", 2)),
            Err(PredicateError::NotComparable(_, _))
        ));

        let not_bool = Predicate::<Item>::new("i", Expr::param("i").field("qty"));
        assert_eq!(
            not_bool.evaluate(&item("lamp", 2)),
            Err(PredicateError::NotBoolean("number".to_string()))
        );
    }

    #[test]
    fn numbers_compare_by_value() {
        let p = Predicate::<Item>::new("i", Expr::param("i").field("qty").eq(Expr::constant(2.0)));
        assert!(p.evaluate(&item("lamp", 2)).unwrap());
    }

    #[derive(Serialize)]
    struct Counter {
        n: i64,
    }

    #[derive(Serialize)]
    struct Wide {
        n: u64,
    }

    #[test]
    fn large_integers_compare_exactly() {
        let at = |op: fn(Expr, Expr) -> Expr, rhs: i64| {
            Predicate::<Counter>::new("c", op(Expr::param("c").field("n"), Expr::constant(rhs)))
        };
        let row = Counter { n: 9_007_199_254_740_992 };

        assert!(!at(Expr::eq, 9_007_199_254_740_993).evaluate(&row).unwrap());
        assert!(at(Expr::ne, 9_007_199_254_740_993).evaluate(&row).unwrap());
        assert!(at(Expr::lt, 9_007_199_254_740_993).evaluate(&row).unwrap());
        assert!(at(Expr::eq, 9_007_199_254_740_992).evaluate(&row).unwrap());

        let top = Wide { n: u64::MAX };
        let below = Predicate::<Wide>::new("w", Expr::param("w").field("n").gt(Expr::constant(u64::MAX - 1)));
        assert!(below.evaluate(&top).unwrap());
        let negative = Predicate::<Wide>::new("w", Expr::param("w").field("n").gt(Expr::constant(-1)));
        assert!(negative.evaluate(&top).unwrap());
    }

    #[test]
    fn free_canonical_parameter_is_not_captured() {
        let stray = || Predicate::<Item>::new("x", Expr::param("p").field("qty").gt(Expr::constant(1)));
        assert_eq!(
            stray().evaluate(&item("lamp", 2)),
            Err(PredicateError::UnboundParameter("p".to_string()))
        );

        let combined = stray().or(named("y", "lamp"));
        assert_eq!(
            combined.evaluate(&item("lamp", 2)),
            Err(PredicateError::UnboundParameter("p'".to_string()))
        );
        assert!(matches!(
            stray().negate().evaluate(&item("lamp", 2)),
            Err(PredicateError::UnboundParameter(_))
        ));
    }

    #[test]
    fn canonical_parameter_is_kept_as_is() {
        let combined = named("p", "lamp").and(qty_over("p", 1));
        assert_eq!(combined.to_string(), r#"p => ((p.name == "lamp") && (p.qty > 1))"#);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        #[test]
        fn or_matches_boolean_or_regardless_of_names(
            left in "[a-z]{1,6}",
            right in "[a-z]{1,6}",
            qty in -20i64..20,
            threshold in -20i64..20,
            lamp in any::<bool>(),
        ) {
            let entity = item(if lamp { "lamp" } else { "desk" }, qty);
            let l = named(&left, "lamp");
            let r = qty_over(&right, threshold);
            let expected = l.evaluate(&entity).unwrap() || r.evaluate(&entity).unwrap();
            prop_assert_eq!(l.or(r).evaluate(&entity).unwrap(), expected);
        }
    }
}
