use std::collections::HashMap;

use crate::enums::BufferUsage;
use crate::limits::MAX_BUFFERS;

#[derive(Default)]
pub struct Buffer {
    pub data: Vec<u8>,
    pub usage: Option<BufferUsage>,
}

/// 1-based name-keyed store for vertex/index byte buffers, name 0 meaning "unbound".
#[derive(Default)]
pub struct BufferStore {
    buffers: HashMap<u32, Buffer>,
    next_name: u32,
}

impl BufferStore {
    pub fn new() -> BufferStore {
        BufferStore { buffers: HashMap::new(), next_name: 1 }
    }

    pub fn gen(&mut self, n: u32) -> Option<Vec<u32>> {
        if self.buffers.len() as u32 + n > MAX_BUFFERS {
            return None;
        }
        let mut names = Vec::with_capacity(n as usize);
        for _ in 0..n {
            let name = self.next_name;
            self.next_name += 1;
            self.buffers.insert(name, Buffer::default());
            names.push(name);
        }
        Some(names)
    }

    pub fn delete(&mut self, name: u32) {
        self.buffers.remove(&name);
    }

    pub fn get(&self, name: u32) -> Option<&Buffer> {
        self.buffers.get(&name)
    }

    pub fn get_mut(&mut self, name: u32) -> Option<&mut Buffer> {
        self.buffers.get_mut(&name)
    }

    pub fn is_buffer(&self, name: u32) -> bool {
        name != 0 && self.buffers.contains_key(&name)
    }

    /// Replaces the buffer's storage entirely.
    pub fn data(&mut self, name: u32, bytes: &[u8], usage: BufferUsage) {
        if let Some(buf) = self.buffers.get_mut(&name) {
            buf.data = bytes.to_vec();
            buf.usage = Some(usage);
        }
    }

    /// Overwrites `bytes.len()` bytes at `offset`. Returns `false` on an out-of-range write.
    pub fn sub_data(&mut self, name: u32, offset: usize, bytes: &[u8]) -> bool {
        let Some(buf) = self.buffers.get_mut(&name) else { return false };
        let end = offset.saturating_add(bytes.len());
        if end > buf.data.len() {
            return false;
        }
        buf.data[offset..end].copy_from_slice(bytes);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_data_out_of_range_rejected() {
        let mut store = BufferStore::new();
        let [name] = store.gen(1).unwrap()[..] else { unreachable!() };
        store.data(name, &[0u8; 4], BufferUsage::StaticDraw);
        assert!(!store.sub_data(name, 2, &[1, 2, 3]));
        assert!(store.sub_data(name, 2, &[1, 2]));
        assert_eq!(store.get(name).unwrap().data, vec![0, 0, 1, 2]);
    }
}
