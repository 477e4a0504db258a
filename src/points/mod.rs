//! Abstract point space of the TSP encoding.
//!
//! Every city contributes two points, the representative entered on arrival
//! (`CityIn`) and the one left on departure (`CityOut`). A single `Pivot`
//! point is shared by all cities. Points are numbered in construction order,
//! which is also the index used by the distance matrix:
//!
//! ```text
//! CityIn(0)=0, CityOut(0)=1, CityIn(1)=2, CityOut(1)=3, ..., Pivot=2n
//! ```

use std::fmt::Display;

/// Stable index of a point in its [`PointSpace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(usize);

impl PointId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of a point in the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRole {
    CityIn(usize),
    CityOut(usize),
    Pivot,
}

impl Display for PointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointRole::CityIn(i) => write!(f, "in({i})"),
            PointRole::CityOut(i) => write!(f, "out({i})"),
            PointRole::Pivot => write!(f, "pivot"),
        }
    }
}

/// The `2·cities + 1` points of an instance with their role labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointSpace {
    city_count: usize,
    roles: Vec<PointRole>,
}

impl PointSpace {
    /// Builds the point space for `city_count` cities.
    pub fn for_cities(city_count: usize) -> Self {
        let mut roles = Vec::with_capacity(2 * city_count + 1);
        for city in 0..city_count {
            roles.push(PointRole::CityIn(city));
            roles.push(PointRole::CityOut(city));
        }
        roles.push(PointRole::Pivot);
        Self { city_count, roles }
    }

    pub fn city_count(&self) -> usize {
        self.city_count
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Always false: the pivot exists even without cities.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `city >= city_count`.
    pub fn city_in(&self, city: usize) -> PointId {
        assert!(city < self.city_count, "city index out of range");
        PointId(2 * city)
    }

    /// # Panics
    ///
    /// Panics if `city >= city_count`.
    pub fn city_out(&self, city: usize) -> PointId {
        assert!(city < self.city_count, "city index out of range");
        PointId(2 * city + 1)
    }

    pub fn pivot(&self) -> PointId {
        PointId(2 * self.city_count)
    }

    pub fn role(&self, point: PointId) -> Option<PointRole> {
        self.roles.get(point.0).copied()
    }

    /// Iterates `(id, role)` in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, PointRole)> + '_ {
        self.roles
            .iter()
            .enumerate()
            .map(|(index, &role)| (PointId(index), role))
    }
}
