pub mod maze;
pub mod shapes;
pub mod sphere;

pub use maze::{maze, maze_seeded};
pub use shapes::{checkerboard, circle, triangle};
pub use sphere::sphere_shade;

/// The boolean generators, for menus and command parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Circle,
    Triangle,
    Checkerboard,
    Maze,
}

impl GeneratorKind {
    pub const ALL: &[GeneratorKind] = &[
        GeneratorKind::Circle,
        GeneratorKind::Triangle,
        GeneratorKind::Checkerboard,
        GeneratorKind::Maze,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Circle => "circle",
            GeneratorKind::Triangle => "triangle",
            GeneratorKind::Checkerboard => "checker",
            GeneratorKind::Maze => "maze",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}
