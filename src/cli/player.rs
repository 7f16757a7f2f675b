use tabled::Table;

use crate::{
    cli::{connect, load_settings, report_unknown_device, target_device},
    error, info,
    player::{self, UPDATE_DELAY, VolumeChange},
    spotify::PlaybackRemote,
    success,
    types::{DeviceTableRow, PlaybackState},
    utils, warning,
};

const TITLE_WIDTH: usize = 60;

pub async fn now() {
    let client = connect().await;
    match client.current_state().await {
        Ok(Some(state)) => print_state(&state),
        Ok(None) => info!("Nothing is playing."),
        Err(e) => error!("Cannot read playback state: {}", e),
    }
}

fn print_state(state: &PlaybackState) {
    let status = if state.is_playing { "Playing" } else { "Paused" };
    match &state.title {
        Some(title) => info!("{}: {}", status, utils::elide(title, TITLE_WIDTH)),
        None => info!("{}", status),
    }
    if !state.artists.is_empty() {
        info!("{}", utils::elide(&state.artists.join(", "), TITLE_WIDTH));
    }
    if let Some(volume) = state.volume {
        info!("Volume {}%", volume);
    }
    if let Some(url) = &state.album_art {
        info!("Album art {}", url);
    }
}

/// Pauses when something is playing, resumes otherwise.
pub async fn toggle() {
    let client = connect().await;
    let mut settings = load_settings().await;
    let Some(device_id) = target_device(&client, &mut settings).await.and_then(|d| d.id) else {
        return report_unknown_device();
    };

    let playing = match client.current_state().await {
        Ok(state) => state.is_some_and(|s| s.is_playing),
        Err(e) => error!("Cannot read playback state: {}", e),
    };

    if playing {
        match client.pause(&device_id).await {
            Ok(()) => success!("Paused."),
            Err(e) => error!("Cannot pause: {}", e),
        }
    } else {
        match client.resume(&device_id).await {
            Ok(()) => success!("Playing."),
            Err(e) => error!("Cannot resume: {}", e),
        }
    }
}

pub async fn next() {
    skip(true).await
}

pub async fn previous() {
    skip(false).await
}

async fn skip(forward: bool) {
    let client = connect().await;
    let mut settings = load_settings().await;
    let Some(device_id) = target_device(&client, &mut settings).await.and_then(|d| d.id) else {
        return report_unknown_device();
    };

    let result = if forward {
        client.next(&device_id).await
    } else {
        client.previous(&device_id).await
    };
    if let Err(e) = result {
        error!("Cannot skip track: {}", e);
    }

    tokio::time::sleep(UPDATE_DELAY).await;
    match client.current_state().await {
        Ok(Some(state)) => print_state(&state),
        Ok(None) => {}
        Err(e) => warning!("Cannot read playback state: {}", e),
    }
}

pub async fn volume(change: VolumeChange) {
    let client = connect().await;
    let mut settings = load_settings().await;
    let Some(device) = target_device(&client, &mut settings).await else {
        return report_unknown_device();
    };
    let Some(device_id) = device.id else {
        return report_unknown_device();
    };

    let level = match (change, device.volume_percent) {
        (VolumeChange::Set(level), _) => level,
        (change, Some(current)) => change.apply(current),
        (_, None) => {
            warning!("{} does not report its volume.", device.name);
            return;
        }
    };

    match client.set_volume(level, &device_id).await {
        Ok(()) => success!("Volume {}%", level),
        Err(e) => error!("Cannot change volume: {}", e),
    }
}

pub async fn devices() {
    let client = connect().await;
    let settings = load_settings().await;
    let devices = match client.list_devices().await {
        Ok(devices) => devices,
        Err(e) => error!("Cannot list playback devices: {}", e),
    };

    if devices.is_empty() {
        warning!("No playback devices found. Start Spotify on one of your devices.");
        return;
    }

    let current = player::choose_device(&devices, settings.device()).and_then(|d| d.id.clone());
    let rows: Vec<DeviceTableRow> = devices
        .into_iter()
        .map(|d| DeviceTableRow {
            active: if d.id.is_some() && d.id == current {
                "*".to_string()
            } else {
                String::new()
            },
            name: d.name,
            kind: d.kind,
            volume: d
                .volume_percent
                .map(|v| format!("{}%", v))
                .unwrap_or_default(),
            id: d.id.unwrap_or_default(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

/// Transfers playback to the device matching `query` and remembers it.
pub async fn device(query: String) {
    let client = connect().await;
    let mut settings = load_settings().await;
    let devices = match client.list_devices().await {
        Ok(devices) => devices,
        Err(e) => error!("Cannot list playback devices: {}", e),
    };

    let Some(device) = player::find_device(&devices, &query) else {
        warning!("No device matches '{}'. Run concertista devices.", query);
        return;
    };
    let Some(device_id) = device.id.clone() else {
        warning!("{} cannot be controlled remotely.", device.name);
        return;
    };

    if let Err(e) = client.transfer(&device_id).await {
        error!("Cannot transfer playback: {}", e);
    }

    settings.set_device(Some(device_id));
    if let Err(e) = settings.persist().await {
        warning!("Failed to remember playback device: {}", e);
    }
    success!("Playing on {}.", device.name);
}
