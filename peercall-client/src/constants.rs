/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

/// How long ICE may sit in `disconnected` before the episode is reported as
/// a long disconnection. Short network hiccups recover well inside this
/// window, so the UI never flickers for them.
pub const DISCONNECTED_GRACE_MS: u64 = 5_000;

/// Automatic ICE restarts attempted for a link before giving up on it.
pub const MAX_ICE_RESTARTS: u32 = 5;
