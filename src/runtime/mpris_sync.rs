use crate::mpris::MprisHandle;
use crate::player::{MediaSurface, PlaybackController};

pub fn update_mpris<M: MediaSurface>(mpris: &MprisHandle, controller: &PlaybackController<M>) {
    let playback = controller.playback();
    mpris.set_track_metadata(controller.current_track(), playback.duration);
    mpris.set_playback(playback.state, playback.position, playback.rate);
}
