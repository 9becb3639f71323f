use tickwork_ecs::Component;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}
impl Component for Position {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}
impl Component for Velocity {}

#[derive(Clone, Debug, PartialEq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}
impl Component for Health {}
