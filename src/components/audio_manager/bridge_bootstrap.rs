// Desktop-webview bridge: a registry of hidden audio elements keyed by track id.
// Listeners queue events; the Rust side drains the queue on a timer. Every queued
// event and drain carries the sequence number of the last command applied.
pub(super) const BRIDGE_BOOTSTRAP_JS: &str = r#"
(() => {
  if (window.__aguilaTracks) {
    return true;
  }

  const tracks = new Map();
  const finite = (value) => (Number.isFinite(value) ? value : null);
  const enqueue = (entry, event) => entry.queue.push({ seq: entry.seq, event });

  const listen = (entry) => {
    const audio = entry.audio;
    const push = (event) => enqueue(entry, event);
    entry.handlers = {
      timeupdate: () =>
        push({
          kind: "time_update",
          position: audio.currentTime,
          duration: finite(audio.duration),
        }),
      loadedmetadata: () =>
        push({ kind: "loaded_metadata", duration: finite(audio.duration) }),
      durationchange: () =>
        push({ kind: "loaded_metadata", duration: finite(audio.duration) }),
      play: () => push({ kind: "playing" }),
      pause: () => push({ kind: "paused" }),
      ended: () => push({ kind: "ended" }),
      volumechange: () => push({ kind: "volume_changed", level: audio.volume }),
      error: () =>
        push({ kind: "error", code: audio.error ? audio.error.code : 0 }),
    };
    for (const [name, handler] of Object.entries(entry.handlers)) {
      audio.addEventListener(name, handler);
    }
  };

  window.__aguilaTracks = {
    open(id, src) {
      if (tracks.has(id)) {
        return true;
      }
      const audio = document.createElement("audio");
      audio.preload = "metadata";
      audio.style.display = "none";
      audio.src = src;
      document.body.appendChild(audio);
      const entry = { audio, seq: 0, queue: [], handlers: {} };
      listen(entry);
      tracks.set(id, entry);
      return true;
    },

    apply(id, seq, command) {
      const entry = tracks.get(id);
      if (!entry) {
        return false;
      }
      entry.seq = seq;
      const audio = entry.audio;
      switch (command.type) {
        case "play":
          audio.play().catch((err) =>
            enqueue(entry, {
              kind: "play_rejected",
              reason: String((err && err.name) || err),
            })
          );
          break;
        case "pause":
          audio.pause();
          break;
        case "seek":
          audio.currentTime = command.position;
          break;
        case "set_volume":
          audio.volume = Math.min(1, Math.max(0, command.level));
          break;
      }
      return true;
    },

    drain(id) {
      const entry = tracks.get(id);
      if (!entry) {
        return { paused: true, seq: 0, events: [] };
      }
      const events = entry.queue;
      entry.queue = [];
      return { paused: entry.audio.paused, seq: entry.seq, events };
    },

    release(id) {
      const entry = tracks.get(id);
      if (!entry) {
        return false;
      }
      for (const [name, handler] of Object.entries(entry.handlers)) {
        entry.audio.removeEventListener(name, handler);
      }
      entry.audio.pause();
      entry.audio.removeAttribute("src");
      entry.audio.load();
      entry.audio.remove();
      tracks.delete(id);
      return true;
    },
  };

  return true;
})();
"#;
