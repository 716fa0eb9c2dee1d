/*
    MartyPC
    https://github.com/dbalsom/martypc

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    ---------------------------------------------------------------------------

    bus.rs

    Flat memory owned by the machine. All accesses wrap around at the end
    of memory, so reads and writes never fail.

*/

pub const DEFAULT_MEMORY_SIZE: usize = 0x10_0000;

pub struct BusInterface {
    memory: Vec<u8>,
}

impl Default for BusInterface {
    fn default() -> Self {
        BusInterface::new(DEFAULT_MEMORY_SIZE)
    }
}

impl BusInterface {
    /// Create a zero-filled memory of `size` bytes. A size of zero is raised to one byte.
    pub fn new(size: usize) -> Self {
        if size == 0 {
            log::warn!("Memory size of 0 requested, using 1 byte");
        }
        Self {
            memory: vec![0; size.max(1)],
        }
    }

    pub fn size(&self) -> usize {
        self.memory.len()
    }

    #[inline(always)]
    fn wrap(&self, address: usize) -> usize {
        address % self.memory.len()
    }

    pub fn read_u8(&self, address: u32) -> u8 {
        self.memory[self.wrap(address as usize)]
    }

    /// Little-endian read. Each byte wraps independently.
    pub fn read_u16(&self, address: u32) -> u16 {
        u16::from_le_bytes([self.read_u8(address), self.read_u8(address.wrapping_add(1))])
    }

    pub fn write_u8(&mut self, address: u32, data: u8) {
        let idx = self.wrap(address as usize);
        self.memory[idx] = data;
    }

    pub fn write_u16(&mut self, address: u32, data: u16) {
        let [lo, hi] = data.to_le_bytes();
        self.write_u8(address, lo);
        self.write_u8(address.wrapping_add(1), hi);
    }

    /// Fill `buf` from memory starting at `offset`.
    pub fn read_bytes(&self, offset: u32, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.memory[self.wrap(offset as usize + i)];
        }
    }

    pub fn write_bytes(&mut self, offset: u32, src: &[u8]) {
        for (i, byte) in src.iter().enumerate() {
            let idx = self.wrap(offset as usize + i);
            self.memory[idx] = *byte;
        }
    }

    /// Copy a program image to `location`. Images larger than memory wrap around and overwrite
    /// their own start.
    pub fn copy_from(&mut self, src: &[u8], location: u32) {
        if src.len() > self.memory.len() {
            log::warn!(
                "Image of {} bytes exceeds memory size of {} bytes and will wrap",
                src.len(),
                self.memory.len()
            );
        }
        self.write_bytes(location, src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let mut bus = BusInterface::new(0x100);
        bus.write_u16(0x10, 0xBEEF);
        assert_eq!(bus.read_u8(0x10), 0xEF);
        assert_eq!(bus.read_u8(0x11), 0xBE);
        assert_eq!(bus.read_u16(0x10), 0xBEEF);
    }

    #[test]
    fn test_wraparound() {
        let mut bus = BusInterface::new(0x100);
        bus.write_u16(0xFF, 0x1234);
        assert_eq!(bus.read_u8(0xFF), 0x34);
        assert_eq!(bus.read_u8(0x00), 0x12);

        bus.write_bytes(0x1FE, &[1, 2, 3]);
        let mut buf = [0u8; 3];
        bus.read_bytes(0xFE, &mut buf);
        assert_eq!(buf, [1, 2, 3]);
    }

    #[test]
    fn test_window_read_at_end_of_memory() {
        let mut bus = BusInterface::new(4);
        bus.copy_from(&[0xAA, 0xBB, 0xCC, 0xDD], 0);
        let mut window = [0u8; 6];
        bus.read_bytes(2, &mut window);
        assert_eq!(window, [0xCC, 0xDD, 0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_zero_size() {
        let bus = BusInterface::new(0);
        assert_eq!(bus.size(), 1);
        assert_eq!(bus.read_u16(0), 0);
    }
}
