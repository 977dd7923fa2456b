//! Newline-delimited JSON frame streams.

use std::io::{BufRead, Write};

use crate::{FrameEnvelope, SampleFrame, StatsError, StatsResult};

/// Yields one `SampleFrame` per non-blank line of `{"frameRate": .., "timers": {..}}`.
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line_no: 0,
            buf: String::new(),
        }
    }

    fn parse_line(&self) -> StatsResult<SampleFrame> {
        let env: FrameEnvelope = serde_json::from_str(self.buf.trim())
            .map_err(|e| StatsError::Sample(format!("line {}: {e}", self.line_no)))?;
        SampleFrame::try_from(env)
            .map_err(|e| StatsError::Sample(format!("line {}: {e}", self.line_no)))
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = StatsResult<SampleFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.inner.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    if self.buf.trim().is_empty() {
                        continue;
                    }
                    return Some(self.parse_line());
                }
                Err(err) => return Some(Err(StatsError::Io(err))),
            }
        }
    }
}

pub fn write_frames<W: Write>(out: &mut W, frames: &[FrameEnvelope]) -> StatsResult<()> {
    for env in frames {
        serde_json::to_writer(&mut *out, env)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_frames_and_skips_blank_lines() {
        let input = concat!(
            "{\"frameRate\": 60, \"timers\": {\"A\": [5000, 10]}}\n",
            "\n",
            "{\"frameRate\": 58.5}\n",
        );
        let frames: Vec<_> = FrameReader::new(Cursor::new(input))
            .collect::<StatsResult<_>>()
            .expect("frames");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].sample("A").map(|s| s.gpu), Some(5000.0));
        assert!(frames[1].is_empty());
        assert_eq!(frames[1].frame_rate, 58.5);
    }

    #[test]
    fn errors_name_the_line() {
        let input = "{\"frameRate\": 60}\n{\"frameRate\": 60, \"timers\": {\"A\": [1]}}\n";
        let mut reader = FrameReader::new(Cursor::new(input));
        assert!(reader.next().expect("first").is_ok());
        let err = reader.next().expect("second").expect_err("bad pair");
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn written_frames_read_back() {
        let frames = vec![FrameEnvelope::from(
            &SampleFrame::empty(30.0).with_timer("Ui", 1500.0, 2500.0),
        )];
        let mut buf = Vec::new();
        write_frames(&mut buf, &frames).expect("write");
        let back: Vec<_> = FrameReader::new(Cursor::new(buf))
            .collect::<StatsResult<_>>()
            .expect("read");
        assert_eq!(back[0].sample("Ui").map(|s| s.cpu), Some(2500.0));
    }
}
