pub mod domain;

use bevy::prelude::*;

#[derive(Component)]
pub struct MainCamera;
