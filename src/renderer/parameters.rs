//! Shader Parameter Sets
//!
//! A shader program exposes a fixed collection of named parameter slots.
//! [`ParameterSet`] is the narrow interface the binder writes through: slot
//! names are resolved once into [`SlotId`]s, after which every write is a
//! direct, infallible store.
//!
//! [`ParameterTable`] is the CPU-side implementation: it declares its slots up
//! front (as reflected from a shader) and keeps the last value written to each
//! one, ready to be uploaded or inspected.

use glam::{Mat4, Vec3, Vec4};
use rustc_hash::FxHashMap;

use crate::renderer::settings::SlotNames;

/// Resolved handle to one slot of a [`ParameterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u32);

impl SlotId {
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A value written into a slot. Arrays are borrowed, never copied by the writer.
#[derive(Debug, Clone, Copy)]
pub enum ParameterValue<'a, T> {
    Matrix(Mat4),
    Matrices(&'a [Mat4]),
    Vector3(Vec3),
    Vector4(Vec4),
    Vectors4(&'a [Vec4]),
    Scalar(f32),
    Texture(&'a T),
}

/// The named parameter collection of a shader program.
pub trait ParameterSet {
    /// Texture handle type bound to sampler slots.
    type Texture;

    /// Resolves a slot by its exact name.
    fn find_slot(&self, name: &str) -> Option<SlotId>;

    /// Stores `value` into a slot previously returned by [`find_slot`](Self::find_slot).
    fn write(&mut self, slot: SlotId, value: ParameterValue<'_, Self::Texture>);
}

/// Owned copy of a slot's last written value.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter<T> {
    Matrix(Mat4),
    Matrices(Vec<Mat4>),
    Vector3(Vec3),
    Vector4(Vec4),
    Vectors4(Vec<Vec4>),
    Scalar(f32),
    Texture(T),
}

impl<T> Parameter<T> {
    #[must_use]
    pub fn as_matrix(&self) -> Option<Mat4> {
        match self {
            Self::Matrix(m) => Some(*m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_matrices(&self) -> Option<&[Mat4]> {
        match self {
            Self::Matrices(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_vector3(&self) -> Option<Vec3> {
        match self {
            Self::Vector3(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_vector4(&self) -> Option<Vec4> {
        match self {
            Self::Vector4(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_vectors4(&self) -> Option<&[Vec4]> {
        match self {
            Self::Vectors4(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Self::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_texture(&self) -> Option<&T> {
        match self {
            Self::Texture(t) => Some(t),
            _ => None,
        }
    }
}

impl<T: Clone> ParameterValue<'_, T> {
    fn to_parameter(self) -> Parameter<T> {
        match self {
            Self::Matrix(m) => Parameter::Matrix(m),
            Self::Matrices(m) => Parameter::Matrices(m.to_vec()),
            Self::Vector3(v) => Parameter::Vector3(v),
            Self::Vector4(v) => Parameter::Vector4(v),
            Self::Vectors4(v) => Parameter::Vectors4(v.to_vec()),
            Self::Scalar(s) => Parameter::Scalar(s),
            Self::Texture(t) => Parameter::Texture(t.clone()),
        }
    }
}

#[derive(Debug, Clone)]
struct TableSlot<T> {
    name: String,
    value: Option<Parameter<T>>,
    writes: u64,
}

/// CPU-side parameter collection with a fixed set of named slots.
#[derive(Debug, Clone)]
pub struct ParameterTable<T> {
    slots: Vec<TableSlot<T>>,
    lookup: FxHashMap<String, SlotId>,
}

impl<T: Clone> ParameterTable<T> {
    /// Declares the given slots. Duplicate names resolve to their first declaration.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut slots = Vec::new();
        let mut lookup = FxHashMap::default();

        for name in names {
            let name = name.into();
            if lookup.contains_key(&name) {
                continue;
            }
            let id = SlotId::new(slots.len() as u32);
            lookup.insert(name.clone(), id);
            slots.push(TableSlot {
                name,
                value: None,
                writes: 0,
            });
        }

        Self { slots, lookup }
    }

    /// Declares exactly the slots of the canonical PBR shader.
    #[must_use]
    pub fn pbr() -> Self {
        Self::new(SlotNames::default().iter())
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Declared slot names, in declaration order.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Last value written to `name`, `None` if unknown or never written.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter<T>> {
        let slot = self.lookup.get(name)?;
        self.value(*slot)
    }

    #[must_use]
    pub fn value(&self, slot: SlotId) -> Option<&Parameter<T>> {
        self.slots.get(slot.index())?.value.as_ref()
    }

    /// Number of writes `name` has received since creation or the last
    /// [`clear_values`](Self::clear_values).
    #[must_use]
    pub fn write_count(&self, name: &str) -> u64 {
        self.lookup
            .get(name)
            .map_or(0, |slot| self.slots[slot.index()].writes)
    }

    /// Forgets every written value; declared slots are kept.
    pub fn clear_values(&mut self) {
        for slot in &mut self.slots {
            slot.value = None;
            slot.writes = 0;
        }
    }
}

impl<T: Clone> ParameterSet for ParameterTable<T> {
    type Texture = T;

    fn find_slot(&self, name: &str) -> Option<SlotId> {
        self.lookup.get(name).copied()
    }

    fn write(&mut self, slot: SlotId, value: ParameterValue<'_, T>) {
        let entry = &mut self.slots[slot.index()];
        entry.writes += 1;

        // Array slots keep their storage between frames.
        match (value, &mut entry.value) {
            (ParameterValue::Matrices(src), Some(Parameter::Matrices(dst))) => {
                dst.clear();
                dst.extend_from_slice(src);
            }
            (ParameterValue::Vectors4(src), Some(Parameter::Vectors4(dst))) => {
                dst.clear();
                dst.extend_from_slice(src);
            }
            (value, dst) => *dst = Some(value.to_parameter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_declarations_collapse() {
        let table = ParameterTable::<u32>::new(["World", "View", "World"]);
        assert_eq!(table.slot_names().collect::<Vec<_>>(), ["World", "View"]);
        assert_eq!(table.find_slot("World"), Some(SlotId::new(0)));
        assert_eq!(table.find_slot("world"), None);
    }

    #[test]
    fn array_writes_replace_previous_contents() {
        let mut table = ParameterTable::<u32>::new(["Bones"]);
        let slot = table.find_slot("Bones").unwrap();

        table.write(slot, ParameterValue::Matrices(&[Mat4::IDENTITY; 4]));
        table.write(slot, ParameterValue::Matrices(&[Mat4::ZERO; 2]));

        assert_eq!(table.get("Bones").and_then(Parameter::as_matrices), Some(&[Mat4::ZERO; 2][..]));
        assert_eq!(table.write_count("Bones"), 2);

        table.clear_values();
        assert!(table.get("Bones").is_none());
        assert_eq!(table.write_count("Bones"), 0);
    }
}
