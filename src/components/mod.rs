pub mod achievements_panel;
pub mod app;
pub mod cake_scene;
pub mod candle_scene;
pub mod gifts_scene;
pub mod intro_scene;
pub mod ladder_scene;
pub mod messages_scene;
pub mod midnight_scene;
pub mod room_scene;
pub mod scene_router;
pub mod settings_modal;
pub mod top_bar;
