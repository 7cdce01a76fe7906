use std::ops::{Bound, RangeBounds};

use crate::error::Result;

/// Ordered byte-level key/value store
///
/// Sits below sql::engine::Engine, which maps tables onto keys.
pub trait Engine: Send + 'static {
    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()>;
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
    fn delete(&mut self, key: &[u8]) -> Result<()>;
    /// Returns the pairs inside `range`, in key order
    fn scan(&self, range: impl RangeBounds<Vec<u8>>) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Returns every pair whose key starts with `prefix`
    ///
    /// The upper bound is the prefix with its last byte bumped, so "ab"
    /// scans ["ab", "ac"). An empty prefix scans everything.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let start = Bound::Included(prefix.to_vec());
        let mut upper = prefix.to_vec();
        while let Some(last) = upper.pop() {
            if last < u8::MAX {
                upper.push(last + 1);
                return self.scan((start, Bound::Excluded(upper)));
            }
        }
        self.scan((start, Bound::Unbounded))
    }
}

#[cfg(test)]
mod tests {
    use super::Engine;
    use crate::{error::Result, storage::memory::MemoryEngine};

    fn test_point_opt(mut eng: impl Engine) -> Result<()> {
        assert_eq!(eng.get(b"missing")?, None);

        eng.set(b"author".to_vec(), vec![1, 2, 3])?;
        assert_eq!(eng.get(b"author")?, Some(vec![1, 2, 3]));

        eng.set(b"author".to_vec(), vec![4])?;
        assert_eq!(eng.get(b"author")?, Some(vec![4]));

        eng.delete(b"author")?;
        assert_eq!(eng.get(b"author")?, None);

        eng.set(b"".to_vec(), vec![])?;
        assert_eq!(eng.get(b"")?, Some(vec![]));
        Ok(())
    }

    fn test_scan_prefix(mut eng: impl Engine) -> Result<()> {
        eng.set(b"book".to_vec(), b"1".to_vec())?;
        eng.set(b"author".to_vec(), b"2".to_vec())?;
        eng.set(b"auto".to_vec(), b"3".to_vec())?;
        eng.set(b"aut".to_vec(), b"4".to_vec())?;
        eng.set(vec![b'a', 0xff, 0xff], b"5".to_vec())?;
        eng.set(vec![b'b'], b"6".to_vec())?;

        let keys = eng
            .scan_prefix(b"aut")?
            .into_iter()
            .map(|(k, _)| k)
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![b"aut".to_vec(), b"author".to_vec(), b"auto".to_vec()]
        );

        // 0xff tail rolls the bound over to the next byte up
        let keys = eng
            .scan_prefix(&[b'a', 0xff])?
            .into_iter()
            .map(|(k, _)| k)
            .collect::<Vec<_>>();
        assert_eq!(keys, vec![vec![b'a', 0xff, 0xff]]);

        assert_eq!(eng.scan_prefix(b"")?.len(), 6);
        Ok(())
    }

    #[test]
    fn test_memory() -> Result<()> {
        test_point_opt(MemoryEngine::new())?;
        test_scan_prefix(MemoryEngine::new())?;
        Ok(())
    }
}
