// Colored box pushing rules with a terminal front end.
// Tiles: '#' wall, '@' player, '$' box, '.' target, '*' box on target, '+' player on target, ' ' floor.
// Colored pieces: 'R' 'B' 'G' 'Y' boxes, 'r' 'b' 'g' 'y' their targets,
// '1' '2' '3' '4' box on its own target, '5' '6' '7' '8' player on that target.

pub mod config;
pub mod console_interface;
pub mod core;
pub mod levels;
pub mod models;
pub mod score;
