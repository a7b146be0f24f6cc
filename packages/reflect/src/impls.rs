//! `Reflect` for standard library types.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use dql_core::Value;

use crate::shape::{dict_value, Dict, Entries, Kind, Reflect, Shape};

// === Leaves ===

macro_rules! narrow_leaf {
    ($($t:ty),*) => {$(
        impl Reflect for $t {
            fn shape(&self) -> Shape<'_> {
                Shape::leaf()
            }

            fn to_value(&self) -> Value {
                Value::Integer(*self as i64)
            }
        }
    )*};
}

narrow_leaf!(i8, i16, i32, i64, isize, u8, u16, u32);

macro_rules! wide_leaf {
    ($($t:ty),*) => {$(
        impl Reflect for $t {
            fn shape(&self) -> Shape<'_> {
                Shape::leaf()
            }

            fn to_value(&self) -> Value {
                i64::try_from(*self)
                    .map(Value::Integer)
                    .unwrap_or(Value::Float(*self as f64))
            }
        }
    )*};
}

wide_leaf!(u64, usize, i128, u128);

impl Reflect for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::leaf()
    }

    fn to_value(&self) -> Value {
        Value::Float(*self as f64)
    }
}

impl Reflect for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::leaf()
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Reflect for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::leaf()
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Reflect for char {
    fn shape(&self) -> Shape<'_> {
        Shape::leaf()
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Reflect for str {
    fn shape(&self) -> Shape<'_> {
        Shape::leaf()
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Reflect for String {
    fn shape(&self) -> Shape<'_> {
        Shape::leaf()
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Reflect for () {
    fn shape(&self) -> Shape<'_> {
        Shape::leaf()
    }

    fn to_value(&self) -> Value {
        Value::Null
    }
}

// Sequences are leaves: their elements have no names to be reached by.

impl<T: Reflect> Reflect for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::leaf()
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Reflect::to_value).collect())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::leaf()
    }

    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::leaf()
    }

    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::leaf()
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Reflect::to_value).collect())
    }
}

// === Wrappers ===

impl<T: Reflect> Reflect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(inner) => inner.shape().wrap(),
            None => Shape::Indirect(Kind::Leaf),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Some(inner) => inner.type_name(),
            None => std::any::type_name::<Self>(),
        }
    }
}

// Ownership pointers carry no shape of their own.
macro_rules! transparent {
    ($($ptr:ident),*) => {$(
        impl<T: Reflect + ?Sized> Reflect for $ptr<T> {
            fn shape(&self) -> Shape<'_> {
                (**self).shape()
            }

            fn to_value(&self) -> Value {
                (**self).to_value()
            }

            fn type_name(&self) -> &'static str {
                (**self).type_name()
            }
        }
    )*};
}

transparent!(Box, Rc, Arc);

impl<T: Reflect + ?Sized> Reflect for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

// === Dictionaries ===

macro_rules! string_keyed {
    ($($key:ty),*) => {$(
        impl<V: Reflect, S: BuildHasher> Dict for HashMap<$key, V, S> {
            fn entries(&self) -> Entries<'_> {
                Box::new(
                    self.iter()
                        .map(|(k, v)| (Borrow::<str>::borrow(k), v as &dyn Reflect)),
                )
            }

            fn get(&self, key: &str) -> Option<&dyn Reflect> {
                HashMap::get(self, key).map(|v| v as &dyn Reflect)
            }
        }

        impl<V: Reflect, S: BuildHasher> Reflect for HashMap<$key, V, S> {
            fn shape(&self) -> Shape<'_> {
                Shape::dict(self)
            }

            fn to_value(&self) -> Value {
                dict_value(self)
            }
        }

        impl<V: Reflect> Dict for BTreeMap<$key, V> {
            fn entries(&self) -> Entries<'_> {
                Box::new(
                    self.iter()
                        .map(|(k, v)| (Borrow::<str>::borrow(k), v as &dyn Reflect)),
                )
            }

            fn get(&self, key: &str) -> Option<&dyn Reflect> {
                BTreeMap::get(self, key).map(|v| v as &dyn Reflect)
            }
        }

        impl<V: Reflect> Reflect for BTreeMap<$key, V> {
            fn shape(&self) -> Shape<'_> {
                Shape::dict(self)
            }

            fn to_value(&self) -> Value {
                dict_value(self)
            }
        }
    )*};
}

string_keyed!(String, Box<str>, Rc<str>, Arc<str>, &'static str);

// Maps keyed by anything but text cannot be navigated by name.
macro_rules! other_keyed {
    ($($key:ty),*) => {$(
        impl<V: Reflect, S: BuildHasher> Reflect for HashMap<$key, V, S> {
            fn shape(&self) -> Shape<'_> {
                Shape::leaf()
            }

            fn to_value(&self) -> Value {
                Value::Map(self.iter().map(|(k, v)| (k.to_string(), v.to_value())).collect())
            }
        }

        impl<V: Reflect> Reflect for BTreeMap<$key, V> {
            fn shape(&self) -> Shape<'_> {
                Shape::leaf()
            }

            fn to_value(&self) -> Value {
                Value::Map(self.iter().map(|(k, v)| (k.to_string(), v.to_value())).collect())
            }
        }
    )*};
}

other_keyed!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, bool, char);

// === Dynamic values ===

impl Reflect for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Map(map) => Shape::dict(map),
            _ => Shape::leaf(),
        }
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Dict for serde_json::Map<String, serde_json::Value> {
    fn entries(&self) -> Entries<'_> {
        Box::new(self.iter().map(|(k, v)| (k.as_str(), v as &dyn Reflect)))
    }

    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        serde_json::Map::get(self, key).map(|v| v as &dyn Reflect)
    }
}

impl Reflect for serde_json::Map<String, serde_json::Value> {
    fn shape(&self) -> Shape<'_> {
        Shape::dict(self)
    }

    fn to_value(&self) -> Value {
        dict_value(self)
    }
}

impl Reflect for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            serde_json::Value::Object(map) => Shape::dict(map),
            _ => Shape::leaf(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .unwrap_or_else(|| Value::String(n.to_string())),
            },
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(arr) => Value::Array(arr.iter().map(Reflect::to_value).collect()),
            serde_json::Value::Object(map) => dict_value(map),
        }
    }
}
