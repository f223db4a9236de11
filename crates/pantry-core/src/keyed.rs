//! Tables whose string keys are parsed into a normalized value.
//!
//! Several spellings can normalize to the same key (`"1"` and `"1.0.0"`, or an
//! identifier with stray whitespace). A plain `BTreeMap` would keep whichever
//! entry came last; these tables reject the document instead.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer, Error, MapAccess, Visitor};

/// Deserialize a table into a map, failing when two keys parse equal.
pub(crate) fn deserialize<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: FromStr + Ord + fmt::Display,
    K::Err: fmt::Display,
    V: Deserialize<'de>,
{
    deserializer.deserialize_map(UniqueKeys(PhantomData))
}

struct UniqueKeys<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for UniqueKeys<K, V>
where
    K: FromStr + Ord + fmt::Display,
    K::Err: fmt::Display,
    V: Deserialize<'de>,
{
    type Value = BTreeMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a table with unique keys")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map: BTreeMap<K, (String, V)> = BTreeMap::new();
        while let Some((raw, value)) = access.next_entry::<String, V>()? {
            let key = K::from_str(&raw).map_err(A::Error::custom)?;
            match map.entry(key) {
                Entry::Occupied(existing) => {
                    return Err(A::Error::custom(format!(
                        "duplicate key '{raw}': '{}' already names {}",
                        existing.get().0,
                        existing.key()
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert((raw, value));
                }
            }
        }
        Ok(map.into_iter().map(|(key, (_, value))| (key, value)).collect())
    }
}
