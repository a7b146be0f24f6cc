//! Runtime shapes: the three things a value can be to a query.

use std::fmt;

use dql_core::Value;

use crate::names::uncapitalize;

/// Fields of a record, in declared order.
pub type Fields<'a> = Box<dyn Iterator<Item = (&'static str, &'a dyn Reflect)> + 'a>;

/// Entries of a string-keyed dictionary.
pub type Entries<'a> = Box<dyn Iterator<Item = (&'a str, &'a dyn Reflect)> + 'a>;

/// A value whose structure can be inspected at query time.
///
/// Implementations say what shape they have and how to extract them as a
/// `Value`. Everything else (child discovery, name lookup, case folding)
/// is derived from the shape by the adapter.
pub trait Reflect {
    /// The shape of this value.
    fn shape(&self) -> Shape<'_>;

    /// This value as a dynamic `Value` tree.
    fn to_value(&self) -> Value;

    /// Name of the concrete type.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl fmt::Debug for dyn Reflect + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Reflect").field(&self.type_name()).finish()
    }
}

/// A value with a fixed set of named fields.
///
/// Field names are the declared names; the adapter owns the case mapping
/// between them and query names.
pub trait Record {
    /// All fields in declared order.
    fn fields(&self) -> Fields<'_>;

    /// The field with exactly this declared name.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;
}

/// A dictionary keyed by text.
///
/// Only string-keyed maps implement this; maps with any other key type
/// are leaves.
pub trait Dict {
    /// All entries, in the map's own iteration order.
    fn entries(&self) -> Entries<'_>;

    /// The entry under exactly this key.
    fn get(&self, key: &str) -> Option<&dyn Reflect>;
}

/// What a value is, once wrappers are dealt with.
#[derive(Clone, Copy)]
pub enum Kind<'a> {
    Record(&'a dyn Record),
    Dict(&'a dyn Dict),
    Leaf,
}

impl Kind<'_> {
    /// Records and dictionaries are nodes; everything else terminates
    /// traversal.
    pub fn is_node(&self) -> bool {
        !matches!(self, Kind::Leaf)
    }
}

impl fmt::Debug for Kind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Record(_) => f.write_str("Record"),
            Kind::Dict(_) => f.write_str("Dict"),
            Kind::Leaf => f.write_str("Leaf"),
        }
    }
}

/// The shape a value reports about itself.
///
/// `Indirect` marks a value seen through one optional wrapper. Wrapping
/// an `Indirect` shape again yields a leaf: only one level is unwrapped.
#[derive(Clone, Copy, Debug)]
pub enum Shape<'a> {
    Direct(Kind<'a>),
    Indirect(Kind<'a>),
}

impl<'a> Shape<'a> {
    /// A record shape.
    pub fn record<R: Record>(r: &'a R) -> Self {
        Shape::Direct(Kind::Record(r))
    }

    /// A dictionary shape.
    pub fn dict<D: Dict>(d: &'a D) -> Self {
        Shape::Direct(Kind::Dict(d))
    }

    /// A terminal value.
    pub fn leaf() -> Self {
        Shape::Direct(Kind::Leaf)
    }

    /// This shape seen through one more wrapper.
    pub fn wrap(self) -> Self {
        match self {
            Shape::Direct(kind) => Shape::Indirect(kind),
            Shape::Indirect(_) => Shape::Indirect(Kind::Leaf),
        }
    }

    /// The kind, with the wrapper (if any) unwrapped.
    pub fn kind(self) -> Kind<'a> {
        match self {
            Shape::Direct(kind) | Shape::Indirect(kind) => kind,
        }
    }
}

/// Decide what `value` is to a query.
///
/// Every lookup and traversal in the adapter goes through here.
pub fn classify(value: &dyn Reflect) -> Kind<'_> {
    value.shape().kind()
}

/// A record as a map of reported field names to values.
pub fn record_value(r: &dyn Record) -> Value {
    Value::Map(
        r.fields()
            .map(|(name, v)| (uncapitalize(name).into_owned(), v.to_value()))
            .collect(),
    )
}

/// A dictionary as a map.
pub fn dict_value(d: &dyn Dict) -> Value {
    Value::Map(
        d.entries()
            .map(|(k, v)| (k.to_string(), v.to_value()))
            .collect(),
    )
}
