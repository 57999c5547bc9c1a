//! Data types attached to ports, parameters and struct fields.
//!
//! A [`DataType`] is either a scalar [`BasicType`] or a composite (struct or
//! union) holding an ordered list of [`StructField`]s. Composite payloads are
//! shared through [`Arc`], so a type alias and the typedef it names are the
//! same object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Built-in type names whose width depends on the target architecture.
///
/// A [`BasicType`] with one of these names and no packed range reports an
/// unknown width.
pub const ARCH_DEFINED_TYPES: &[&str] = &["integer", "int", "time", "real", "realtime"];

/// A data type as seen by the interface extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataType {
    /// A scalar, vector or unresolved named type.
    Basic(BasicType),
    /// A `struct` typedef.
    Struct(Arc<CompositeType>),
    /// A `union` typedef.
    Union(Arc<CompositeType>),
}

impl DataType {
    /// Wraps a composite definition as a struct type.
    pub fn new_struct(composite: CompositeType) -> Self {
        DataType::Struct(Arc::new(composite))
    }

    /// Wraps a composite definition as a union type.
    pub fn new_union(composite: CompositeType) -> Self {
        DataType::Union(Arc::new(composite))
    }

    /// Returns the type name (`logic`, `payload_t`, ...).
    pub fn name(&self) -> &str {
        match self {
            DataType::Basic(b) => &b.name,
            DataType::Struct(c) | DataType::Union(c) => &c.name,
        }
    }

    /// Returns the bit width, or `None` when it cannot be determined.
    ///
    /// Structs sum their field widths and unions take the maximum. In both
    /// cases a single unknown field width makes the whole width unknown.
    pub fn width(&self) -> Option<u64> {
        match self {
            DataType::Basic(b) => b.width(),
            DataType::Struct(c) => {
                let mut total = 0u64;
                for field in &c.fields {
                    total = total.checked_add(field.width()?)?;
                }
                Some(total)
            }
            DataType::Union(c) => {
                let mut widest = 0u64;
                for field in &c.fields {
                    widest = widest.max(field.width()?);
                }
                Some(widest)
            }
        }
    }

    /// Returns the composite payload for struct and union types.
    pub fn as_composite(&self) -> Option<&CompositeType> {
        match self {
            DataType::Basic(_) => None,
            DataType::Struct(c) | DataType::Union(c) => Some(c),
        }
    }

    /// Returns `true` for struct and union types.
    pub fn is_composite(&self) -> bool {
        self.as_composite().is_some()
    }

    /// Returns the direct fields of a composite type, or an empty slice.
    pub fn fields(&self) -> &[StructField] {
        match self.as_composite() {
            Some(c) => &c.fields,
            None => &[],
        }
    }

    /// Iterates over the leaf fields of this type.
    ///
    /// A basic type yields one entry: `prefix` paired with itself. Composite
    /// types yield every leaf reachable through nested fields, named by the
    /// dot-joined path from `prefix` (`prefix.outer.inner.leaf`). An empty
    /// prefix omits the leading dot.
    pub fn iter_fields(&self, prefix: &str) -> Fields<'_> {
        Fields::new(self, prefix)
    }

    /// Returns `true` when both values refer to the same composite object.
    ///
    /// Basic types are plain values and are never pointer-equal.
    pub fn ptr_eq(&self, other: &DataType) -> bool {
        match (self, other) {
            (DataType::Struct(a), DataType::Struct(b)) => Arc::ptr_eq(a, b),
            (DataType::Union(a), DataType::Union(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<BasicType> for DataType {
    fn from(basic: BasicType) -> Self {
        DataType::Basic(basic)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Basic(b) => fmt::Display::fmt(b, f),
            DataType::Struct(c) | DataType::Union(c) => f.write_str(&c.name),
        }
    }
}

/// A scalar or unresolved type: a net/variable keyword or an unknown name,
/// with an optional packed range and sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicType {
    /// The type name (`logic`, `wire`, or an unresolved user type name).
    pub name: String,
    /// The packed range text, e.g. `[7:0]`. Several dimensions are kept
    /// space-joined (`[3:0] [7:0]`).
    pub bit_range: Option<String>,
    /// Whether the type carries the `signed` modifier.
    pub signed: bool,
}

impl BasicType {
    /// Creates an unsigned type without a packed range.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bit_range: None,
            signed: false,
        }
    }

    /// Returns this type with the given packed range.
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.bit_range = Some(range.into());
        self
    }

    /// Returns this type marked `signed`.
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    /// Returns the integer bounds of a leading `[msb:lsb]` packed range.
    ///
    /// `None` for symbolic ranges and for bounds that overflow `i64`.
    pub fn packed_bounds(&self) -> Option<(i64, i64)> {
        let (msb, lsb) = numeric_bounds(self.bit_range.as_deref()?)?;
        Some((msb.parse().ok()?, lsb.parse().ok()?))
    }

    /// Returns the bit width of this type.
    ///
    /// A numeric `[msb:lsb]` range gives `|msb - lsb| + 1`. Without one,
    /// architecture-defined types (see [`ARCH_DEFINED_TYPES`]) are unknown
    /// and everything else is one bit wide. That includes unresolved user
    /// type names, which therefore report a width of `1` rather than `None`.
    ///
    /// A numeric range whose bounds or width do not fit the integer types
    /// is unknown.
    pub fn width(&self) -> Option<u64> {
        if let Some((msb, lsb)) = self.bit_range.as_deref().and_then(numeric_bounds) {
            let msb: i64 = msb.parse().ok()?;
            let lsb: i64 = lsb.parse().ok()?;
            return msb.abs_diff(lsb).checked_add(1);
        }
        let lowered = self.name.to_ascii_lowercase();
        if ARCH_DEFINED_TYPES.contains(&lowered.as_str()) {
            return None;
        }
        Some(1)
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.signed {
            f.write_str(" signed")?;
        }
        if let Some(range) = &self.bit_range {
            write!(f, " {range}")?;
        }
        Ok(())
    }
}

/// Splits the leading `[msb:lsb]` of a range string into its bound texts
/// when both are decimal integers. Whitespace is allowed only around the
/// colon.
fn numeric_bounds(range: &str) -> Option<(&str, &str)> {
    let rest = range.strip_prefix('[')?;
    let close = rest.find(']')?;
    let (msb, lsb) = rest[..close].split_once(':')?;
    let (msb, lsb) = (msb.trim_end(), lsb.trim_start());
    (is_integer(msb) && is_integer(lsb)).then_some((msb, lsb))
}

fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// A named member of a struct or union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    /// The field name.
    pub name: String,
    /// The field type.
    pub data_type: DataType,
}

impl StructField {
    /// Creates a field.
    pub fn new(name: impl Into<String>, data_type: impl Into<DataType>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    /// Returns the width of the field's type.
    pub fn width(&self) -> Option<u64> {
        self.data_type.width()
    }
}

impl fmt::Display for StructField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.data_type, self.name)
    }
}

/// The payload shared by struct and union types: a name and ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeType {
    /// The typedef name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<StructField>,
}

impl CompositeType {
    /// Creates a composite type from its name and fields.
    pub fn new(name: impl Into<String>, fields: Vec<StructField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

}

/// Lazy depth-first iterator over the leaf fields of a [`DataType`].
///
/// Created by [`DataType::iter_fields`]. Holds only borrowed type data and
/// its own cursor, so calling `iter_fields` again restarts the walk.
pub struct Fields<'a> {
    root: Option<(String, &'a BasicType)>,
    stack: Vec<(String, std::slice::Iter<'a, StructField>)>,
}

impl<'a> Fields<'a> {
    fn new(data_type: &'a DataType, prefix: &str) -> Self {
        match data_type {
            DataType::Basic(b) => Self {
                root: Some((prefix.to_string(), b)),
                stack: Vec::new(),
            },
            DataType::Struct(c) | DataType::Union(c) => Self {
                root: None,
                stack: vec![(prefix.to_string(), c.fields.iter())],
            },
        }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = (String, &'a BasicType);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(leaf) = self.root.take() {
            return Some(leaf);
        }
        loop {
            let (prefix, fields) = self.stack.last_mut()?;
            let Some(field) = fields.next() else {
                self.stack.pop();
                continue;
            };
            let path = if prefix.is_empty() {
                field.name.clone()
            } else {
                format!("{prefix}.{}", field.name)
            };
            match &field.data_type {
                DataType::Basic(b) => return Some((path, b)),
                DataType::Struct(c) | DataType::Union(c) => {
                    self.stack.push((path, c.fields.iter()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logic(range: &str) -> BasicType {
        BasicType::new("logic").with_range(range)
    }

    #[test]
    fn basic_width_from_range() {
        assert_eq!(logic("[7:0]").width(), Some(8));
        assert_eq!(logic("[0:7]").width(), Some(8));
        assert_eq!(logic("[-1:0]").width(), Some(2));
        assert_eq!(logic("[15 : 8]").width(), Some(8));
    }

    #[test]
    fn basic_width_out_of_range_is_unknown() {
        assert_eq!(logic("[9223372036854775807:-9223372036854775808]").width(), None);
        assert_eq!(logic("[99999999999999999999:0]").width(), None);
        assert_eq!(logic("[99999999999999999999:0]").packed_bounds(), None);
        assert_eq!(
            logic("[9223372036854775807:1]").width(),
            Some(9_223_372_036_854_775_807)
        );
    }

    #[test]
    fn packed_bounds_numeric_only() {
        assert_eq!(logic("[7:-2]").packed_bounds(), Some((7, -2)));
        assert_eq!(logic("[W-1:0]").packed_bounds(), None);
        assert_eq!(BasicType::new("logic").packed_bounds(), None);
    }

    #[test]
    fn basic_width_symbolic_range_defaults_to_one() {
        assert_eq!(logic("[WIDTH-1:0]").width(), Some(1));
    }

    #[test]
    fn basic_width_uses_first_dimension() {
        assert_eq!(logic("[3:0] [7:0]").width(), Some(4));
    }

    #[test]
    fn basic_width_arch_defined() {
        assert_eq!(BasicType::new("int").width(), None);
        assert_eq!(BasicType::new("INTEGER").width(), None);
        assert_eq!(BasicType::new("realtime").width(), None);
        assert_eq!(BasicType::new("int").with_range("[3:0]").width(), Some(4));
    }

    #[test]
    fn unresolved_user_type_is_one_bit() {
        assert_eq!(BasicType::new("mystery_t").width(), Some(1));
        assert_eq!(BasicType::new("byte").width(), Some(1));
    }

    #[test]
    fn basic_display() {
        assert_eq!(BasicType::new("logic").to_string(), "logic");
        assert_eq!(logic("[7:0]").to_string(), "logic [7:0]");
        assert_eq!(logic("[7:0]").signed().to_string(), "logic signed [7:0]");
    }

    #[test]
    fn struct_width_sums_fields() {
        let s = DataType::new_struct(CompositeType::new(
            "payload_t",
            vec![
                StructField::new("data", logic("[7:0]")),
                StructField::new("valid", BasicType::new("logic")),
            ],
        ));
        assert_eq!(s.width(), Some(9));
        assert_eq!(s.to_string(), "payload_t");
    }

    #[test]
    fn struct_width_unknown_propagates() {
        let s = DataType::new_struct(CompositeType::new(
            "s_t",
            vec![
                StructField::new("a", logic("[7:0]")),
                StructField::new("n", BasicType::new("int")),
            ],
        ));
        assert_eq!(s.width(), None);
    }

    #[test]
    fn struct_width_overflow_is_unknown() {
        let wide = logic("[9223372036854775807:0]");
        let s = DataType::new_struct(CompositeType::new(
            "big_t",
            vec![
                StructField::new("a", wide.clone()),
                StructField::new("b", wide.clone()),
                StructField::new("c", wide),
            ],
        ));
        assert_eq!(s.width(), None);
        let u = DataType::new_union(CompositeType::new("big_u", s.fields().to_vec()));
        assert_eq!(u.width(), Some(9_223_372_036_854_775_808));
    }

    #[test]
    fn union_width_is_max() {
        let u = DataType::new_union(CompositeType::new(
            "u_t",
            vec![
                StructField::new("a", logic("[7:0]")),
                StructField::new("b", logic("[15:0]")),
            ],
        ));
        assert_eq!(u.width(), Some(16));
    }

    #[test]
    fn union_width_unknown_propagates() {
        let u = DataType::new_union(CompositeType::new(
            "u_t",
            vec![
                StructField::new("a", logic("[7:0]")),
                StructField::new("r", BasicType::new("real")),
            ],
        ));
        assert_eq!(u.width(), None);
    }

    #[test]
    fn empty_composites_are_zero_wide() {
        assert_eq!(
            DataType::new_struct(CompositeType::new("e", vec![])).width(),
            Some(0)
        );
        assert_eq!(
            DataType::new_union(CompositeType::new("e", vec![])).width(),
            Some(0)
        );
    }

    #[test]
    fn iter_fields_basic_yields_itself() {
        let t = DataType::from(logic("[3:0]"));
        let leaves: Vec<_> = t.iter_fields("sig").collect();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].0, "sig");
        assert_eq!(leaves[0].1, &logic("[3:0]"));
    }

    #[test]
    fn iter_fields_three_levels() {
        let level3 = DataType::new_struct(CompositeType::new(
            "level3_t",
            vec![StructField::new("deep", logic("[31:0]"))],
        ));
        let level2 = DataType::new_struct(CompositeType::new(
            "level2_t",
            vec![StructField::new("mid", level3)],
        ));
        let level1 = DataType::new_struct(CompositeType::new(
            "level1_t",
            vec![
                StructField::new("top", level2),
                StructField::new("val", BasicType::new("logic")),
            ],
        ));

        let leaves: Vec<_> = level1.iter_fields("").collect();
        let names: Vec<_> = leaves.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["top.mid.deep", "val"]);
        assert_eq!(leaves[0].1, &logic("[31:0]"));

        let prefixed: Vec<_> = level1.iter_fields("port").map(|(n, _)| n).collect();
        assert_eq!(prefixed, ["port.top.mid.deep", "port.val"]);
    }

    #[test]
    fn iter_fields_is_restartable() {
        let t = DataType::new_struct(CompositeType::new(
            "pair_t",
            vec![
                StructField::new("a", BasicType::new("logic")),
                StructField::new("b", BasicType::new("bit")),
            ],
        ));
        let first: Vec<_> = t.iter_fields("").map(|(n, _)| n).collect();
        let second: Vec<_> = t.iter_fields("").map(|(n, _)| n).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn ptr_eq_distinguishes_clones_from_copies() {
        let a = DataType::new_struct(CompositeType::new("t", vec![]));
        let alias = a.clone();
        let copy = DataType::new_struct(CompositeType::new("t", vec![]));
        assert!(a.ptr_eq(&alias));
        assert!(!a.ptr_eq(&copy));
        assert_eq!(a, copy);
        assert!(!DataType::from(BasicType::new("logic")).ptr_eq(&a));
    }

    #[test]
    fn fields_of_basic_is_empty() {
        assert!(DataType::from(BasicType::new("logic")).fields().is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let t = DataType::new_union(CompositeType::new(
            "u_t",
            vec![StructField::new("a", logic("[7:0]").signed())],
        ));
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"kind\":\"union\""));
        let back: DataType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
