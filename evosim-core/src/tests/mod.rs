mod generation_controller;
mod support;
mod week_resolver;
mod world_model;
