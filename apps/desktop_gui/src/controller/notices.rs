//! Transient notice queue rendered as toasts.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use client_core::Notice;

pub const NOTICE_TTL: Duration = Duration::from_secs(4);
const MAX_VISIBLE_NOTICES: usize = 4;

#[derive(Debug, Clone)]
pub struct PostedNotice {
    pub id: u64,
    pub notice: Notice,
    pub posted_at: Instant,
}

#[derive(Debug, Default)]
pub struct NoticeBoard {
    next_id: u64,
    notices: VecDeque<PostedNotice>,
}

impl NoticeBoard {
    pub fn post(&mut self, notice: Notice) {
        self.post_at(notice, Instant::now());
    }

    pub fn post_at(&mut self, notice: Notice, now: Instant) {
        self.next_id = self.next_id.wrapping_add(1);
        self.notices.push_back(PostedNotice {
            id: self.next_id,
            notice,
            posted_at: now,
        });
        while self.notices.len() > MAX_VISIBLE_NOTICES {
            self.notices.pop_front();
        }
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|posted| posted.id != id);
    }

    pub fn expire(&mut self, now: Instant) {
        self.notices
            .retain(|posted| now.saturating_duration_since(posted.posted_at) < NOTICE_TTL);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostedNotice> {
        self.notices.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notice> {
        self.notices.back().map(|posted| &posted.notice)
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_expire_after_ttl() {
        let mut board = NoticeBoard::default();
        let start = Instant::now();
        board.post_at(Notice::success("saved"), start);
        board.expire(start + Duration::from_secs(1));
        assert!(!board.is_empty());
        board.expire(start + NOTICE_TTL);
        assert!(board.is_empty());
    }

    #[test]
    fn keeps_only_most_recent_notices() {
        let mut board = NoticeBoard::default();
        let now = Instant::now();
        for n in 0..6 {
            board.post_at(Notice::error(format!("failure {n}")), now);
        }
        let messages: Vec<&str> = board.iter().map(|p| p.notice.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["failure 2", "failure 3", "failure 4", "failure 5"]
        );
    }

    #[test]
    fn dismiss_removes_single_notice() {
        let mut board = NoticeBoard::default();
        board.post(Notice::success("one"));
        board.post(Notice::success("two"));
        let first = board.iter().next().map(|p| p.id).expect("posted");
        board.dismiss(first);
        assert_eq!(board.latest().map(|n| n.message.as_str()), Some("two"));
        assert_eq!(board.iter().count(), 1);
    }
}
