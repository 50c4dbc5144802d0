use softgl_math::Mat4;

use crate::enums::{BlendFactor, Cap, Face, MatrixMode, PrimitiveMode, ShadeModel, TestFunc};
use crate::limits::MAX_LISTS;
use crate::lighting::{LightParam, MaterialParam};

/// One recorded display-list entry. A sum type standing in for the tagged-union command
/// records a C implementation would use; playback is a `match` over this enum dispatching
/// to the same front-end entry points used for direct execution.
#[derive(Debug, Clone, Copy)]
pub enum Command {
    Begin(PrimitiveMode),
    End,
    Vertex(f32, f32, f32),
    Color(f32, f32, f32, f32),
    TexCoord(f32, f32),
    Normal(f32, f32, f32),
    Translate(f32, f32, f32),
    Rotate(f32, f32, f32, f32),
    Scale(f32, f32, f32),
    PushMatrix,
    PopMatrix,
    LoadIdentity,
    MultMatrix(Mat4),
    LoadMatrix(Mat4),
    MatrixMode(MatrixMode),
    Ortho(f32, f32, f32, f32, f32, f32),
    Frustum(f32, f32, f32, f32, f32, f32),
    Enable(Cap),
    Disable(Cap),
    BindTexture(u32),
    BlendFunc(BlendFactor, BlendFactor),
    DepthFunc(TestFunc),
    DepthMask(bool),
    CullFace(Face),
    ShadeModel(ShadeModel),
    LightF(u8, LightParam, f32),
    LightFv(u8, LightParam, [f32; 4]),
    MaterialF(Face, MaterialParam, f32),
    MaterialFv(Face, MaterialParam, [f32; 4]),
    CallList(u32),
}

#[derive(Default)]
pub struct DisplayList {
    commands: Vec<Command>,
    valid: bool,
}

impl DisplayList {
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// 1-based name-keyed store of display lists, matching `list_store_t` in spirit: an
/// allocated range is handed out contiguously by [`ListStore::gen_range`].
#[derive(Default)]
pub struct ListStore {
    lists: Vec<Option<DisplayList>>,
}

impl ListStore {
    pub fn new() -> ListStore {
        ListStore { lists: Vec::new() }
    }

    /// Allocates `range` contiguous unused names, growing the backing store as needed.
    /// Returns `0` (per `glGenLists`) if `range` is zero or the ceiling would be exceeded.
    pub fn gen_range(&mut self, range: u32) -> u32 {
        if range == 0 {
            return 0;
        }

        let mut run_start = None;
        let mut run_len = 0u32;
        for (i, slot) in self.lists.iter().enumerate() {
            if slot.is_none() {
                if run_start.is_none() {
                    run_start = Some(i as u32 + 1);
                }
                run_len += 1;
                if run_len == range {
                    let first = run_start.unwrap();
                    for name in first..first + range {
                        self.lists[(name - 1) as usize] = Some(DisplayList::default());
                    }
                    return first;
                }
            } else {
                run_start = None;
                run_len = 0;
            }
        }

        let first = self.lists.len() as u32 + 1;
        if first + range - 1 > MAX_LISTS {
            return 0;
        }
        for _ in 0..range {
            self.lists.push(Some(DisplayList::default()));
        }
        first
    }

    pub fn get(&self, name: u32) -> Option<&DisplayList> {
        if name == 0 {
            return None;
        }
        self.lists.get((name - 1) as usize).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, name: u32) -> Option<&mut DisplayList> {
        if name == 0 {
            return None;
        }
        self.lists.get_mut((name - 1) as usize).and_then(|s| s.as_mut())
    }

    pub fn delete(&mut self, name: u32) {
        if name == 0 {
            return;
        }
        if let Some(slot) = self.lists.get_mut((name - 1) as usize) {
            *slot = None;
        }
    }

    pub fn is_list(&self, name: u32) -> bool {
        self.get(name).is_some()
    }

    pub fn clear(&mut self, name: u32) {
        if let Some(list) = self.get_mut(name) {
            list.commands.clear();
            list.valid = false;
        }
    }

    pub fn push(&mut self, name: u32, cmd: Command) {
        if let Some(list) = self.get_mut(name) {
            list.commands.push(cmd);
        }
    }

    pub fn finish(&mut self, name: u32) {
        if let Some(list) = self.get_mut(name) {
            list.valid = true;
        }
    }
}
