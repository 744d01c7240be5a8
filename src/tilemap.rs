/// A 2D grid stored row-major. The map is a bounded rectangle: no edge
/// wraps, and neighbor enumeration stops at the borders.
#[derive(Clone)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap an already-filled row-major buffer.
    ///
    /// Panics if the buffer length does not match the dimensions; callers
    /// produce the buffer from the same `width`/`height` they pass here.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), width * height, "buffer does not match dimensions");
        Self {
            width,
            height,
            data,
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// 8-connected neighbors, clipped at the map borders.
    pub fn neighbors_8(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(8);
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if self.in_bounds(nx, ny) {
                    result.push((nx as usize, ny as usize));
                }
            }
        }
        result
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let mut map = Tilemap::new_with(4, 3, 0i32);
        map.set(3, 2, 42);
        assert_eq!(*map.get(3, 2), 42);
        assert_eq!(*map.get(0, 0), 0);
    }

    #[test]
    fn test_iter_order_is_row_major() {
        let map = Tilemap::from_vec(2, 2, vec![1, 2, 3, 4]);
        let coords: Vec<_> = map.iter().map(|(x, y, &v)| (x, y, v)).collect();
        assert_eq!(coords, vec![(0, 0, 1), (1, 0, 2), (0, 1, 3), (1, 1, 4)]);
    }

    #[test]
    fn test_corner_has_three_neighbors() {
        let map = Tilemap::new_with(5, 5, 0u8);
        assert_eq!(map.neighbors_8(0, 0).len(), 3);
        assert_eq!(map.neighbors_8(4, 4).len(), 3);
        assert_eq!(map.neighbors_8(2, 2).len(), 8);
    }

    #[test]
    fn test_edges_do_not_wrap() {
        let map = Tilemap::new_with(3, 3, 0u8);
        assert!(!map.neighbors_8(0, 1).contains(&(2, 1)));
    }

    #[test]
    fn test_single_cell_has_no_neighbors() {
        let map = Tilemap::new_with(1, 1, 0u8);
        assert!(map.neighbors_8(0, 0).is_empty());
    }
}
