// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod commands;
mod content;
mod crypto;
mod models;
mod prediction;
mod storage;

use commands::AppState;

fn main() {
    env_logger::init();

    tauri::Builder::default()
        .manage(AppState::new())
        .invoke_handler(tauri::generate_handler![
            commands::is_setup,
            commands::setup,
            commands::unlock,
            commands::lock,
            commands::save_entry,
            commands::get_entry,
            commands::get_entries,
            commands::get_prediction,
            commands::current_phase,
            commands::get_month,
            commands::get_daily_content,
            commands::list_exercises,
            commands::list_tips,
            commands::list_medications,
            commands::save_medication,
            commands::delete_medication,
            commands::toggle_medication_taken,
            commands::get_profile,
            commands::update_profile,
            commands::get_settings,
            commands::update_settings,
            commands::export_data,
            commands::wipe_all_data,
        ])
        .run(tauri::generate_context!())
        .expect("error while running luna");
}
