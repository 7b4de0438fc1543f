//! Animated data-structure visualizer: a force-directed graph and a circular
//! linked list, drawn with Bevy gizmos.

pub mod animation;
pub mod camera;
pub mod graph;
pub mod input;
pub mod layout;
pub mod loader;
pub mod scene;
pub mod structures;
pub mod visual;
