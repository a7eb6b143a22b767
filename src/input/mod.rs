pub mod coords;
