/// A list of items with relative selection weights.
///
/// Serializes as a list of `[item, weight]` pairs,
/// matching the airline tables in airport files.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct WeightedList<T> {
    /// `(item, weight)` pairs. Weights must be non-negative.
    pub entries: Vec<(T, f32)>,
}

impl<T> Default for WeightedList<T> {
    fn default() -> Self { Self { entries: Vec::new() } }
}

impl<T> FromIterator<(T, f32)> for WeightedList<T> {
    fn from_iter<I: IntoIterator<Item = (T, f32)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<T> WeightedList<T> {
    /// Creates a list containing `item` alone.
    pub fn singleton(item: T) -> Self { Self { entries: vec![(item, 1.)] } }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Maps each item to another type, preserving weights.
    ///
    /// # Errors
    /// The first error returned by `f`.
    pub fn try_map_ref<U, E>(
        &self,
        mut f: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<WeightedList<U>, E> {
        self.entries.iter().map(|(item, weight)| Ok((f(item)?, *weight))).collect()
    }

    /// Draws a random item with probability proportional to its weight.
    ///
    /// Returns `None` if the list is empty or all weights are zero.
    pub fn sample<'a>(&'a self, rng: &mut impl rand::Rng) -> Option<&'a T> {
        match self.entries[..] {
            [] => None,
            [(ref item, _)] => Some(item),
            ref entries => {
                let total: f32 = entries.iter().map(|&(_, weight)| weight).sum();
                if total <= 0. {
                    return None;
                }
                let mut remaining = rng.random_range(0.0..total);
                for (item, weight) in entries {
                    if remaining < *weight {
                        return Some(item);
                    }
                    remaining -= weight;
                }
                entries.last().map(|(item, _)| item)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::WeightedList;

    #[test]
    fn serializes_as_pairs() {
        let list: WeightedList<String> = serde_json::from_str(r#"[["aal", 5.0], ["ual", 2.0]]"#).unwrap();
        assert_eq!(list.entries.len(), 2);
        assert_eq!(list.entries[0].0, "aal");
    }

    #[test]
    fn sampling_ignores_zero_weights() {
        let list: WeightedList<&str> = [("never", 0.), ("always", 1.)].into_iter().collect();
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(list.sample(&mut rng), Some(&"always"));
        }
    }

    #[test]
    fn empty_and_degenerate_lists() {
        let empty = WeightedList::<&str>::default();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(empty.sample(&mut rng), None);

        let zeroed: WeightedList<&str> = [("a", 0.), ("b", 0.)].into_iter().collect();
        assert_eq!(zeroed.sample(&mut rng), None);

        assert_eq!(WeightedList::singleton("only").sample(&mut rng), Some(&"only"));
    }
}
