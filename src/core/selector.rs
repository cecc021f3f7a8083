use crate::domain::model::CatalogRecord;
use crate::domain::ports::RandomIndex;
use rand::Rng;

/// Uniform choice backed by the per-thread generator, seeded once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngIndex;

impl RandomIndex for ThreadRngIndex {
    fn index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Picks one record at random.
///
/// Callers must check for an empty result first (and report "no match");
/// `None` is only returned when that contract is broken.
pub fn select_target<'a, R>(records: &'a [CatalogRecord], rng: &R) -> Option<&'a CatalogRecord>
where
    R: RandomIndex + ?Sized,
{
    match records.len() {
        0 => None,
        1 => records.first(),
        len => records.get(rng.index(len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn records(count: usize) -> Vec<CatalogRecord> {
        (0..count)
            .map(|i| CatalogRecord {
                node: format!("node-{i}"),
                address: format!("10.0.0.{i}"),
                datacenter: String::new(),
                service_id: "web".to_string(),
                service_name: "web".to_string(),
                service_address: String::new(),
                service_port: 80,
                service_tags: vec![],
            })
            .collect()
    }

    struct FixedIndex(usize);

    impl RandomIndex for FixedIndex {
        fn index(&self, _len: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn test_single_record_is_always_selected() {
        let records = records(1);
        for _ in 0..20 {
            assert_eq!(select_target(&records, &ThreadRngIndex).unwrap().node, "node-0");
        }
    }

    #[test]
    fn test_uses_injected_index() {
        let records = records(3);

        assert_eq!(select_target(&records, &FixedIndex(2)).unwrap().node, "node-2");
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert!(select_target(&[], &ThreadRngIndex).is_none());
    }

    #[test]
    fn test_every_record_is_eventually_selected() {
        let records = records(4);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            seen.insert(select_target(&records, &ThreadRngIndex).unwrap().node.clone());
        }

        assert_eq!(seen.len(), 4);
    }
}
