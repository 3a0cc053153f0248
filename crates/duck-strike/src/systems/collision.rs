use std::collections::HashMap;

use crate::api::config::MatchConfig;
use crate::api::types::PlayerId;
use crate::components::ball::Ball;
use crate::components::body::MovingBody;
use crate::components::player::Player;
use crate::components::post::GoalPost;
use crate::core::geometry::circle_contact;
use crate::core::time::Millis;

/// Last impulse time per unordered player pair.
///
/// Two players that stay in contact across sub-steps or ticks only exchange
/// one impulse per cooldown window.
#[derive(Debug, Clone, Default)]
pub struct CooldownTable {
    last: HashMap<(PlayerId, PlayerId), Millis>,
    window: Millis,
}

impl CooldownTable {
    pub fn new(window: Millis) -> Self {
        Self {
            last: HashMap::new(),
            window,
        }
    }

    fn key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
        (a.min(b), a.max(b))
    }

    pub fn is_cooling(&self, a: PlayerId, b: PlayerId, now: Millis) -> bool {
        self.last
            .get(&Self::key(a, b))
            .is_some_and(|&at| now - at < self.window)
    }

    pub fn mark(&mut self, a: PlayerId, b: PlayerId, now: Millis) {
        self.last.insert(Self::key(a, b), now);
    }

    pub fn clear(&mut self) {
        self.last.clear();
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}

/// Ball against player. Returns whether they touched.
///
/// The ball takes the full impulse and twice the positional push; the player
/// takes `striker_share` of the impulse. Any touch engages the ball.
pub fn ball_vs_player(ball: &mut Ball, player: &mut Player, config: &MatchConfig) -> bool {
    if player.is_relocating() {
        return false;
    }
    let Some(contact) = circle_contact(
        ball.body.pos,
        ball.body.radius,
        player.body.pos,
        player.body.radius,
    ) else {
        return false;
    };
    let n = contact.normal;

    ball.engage();

    let push = n * (contact.depth / 2.0 + 1.0);
    ball.body.pos += push;
    player.body.pos -= push * 0.5;

    let closing = (ball.body.vel - player.body.vel).dot(n);
    if closing > 0.0 {
        return true;
    }

    let impulse = -(1.0 + config.restitution) * closing / 2.0;
    ball.body.vel += n * impulse;
    player.body.vel -= n * (impulse * config.striker_share);

    ball.body.moving = true;
    player.body.wake_if_fast(config.stop_threshold);
    true
}

/// Player against player, throttled by the pair cooldown. Returns whether an
/// impulse was exchanged.
pub fn player_vs_player(
    a: &mut Player,
    b: &mut Player,
    cooldowns: &mut CooldownTable,
    now: Millis,
    config: &MatchConfig,
) -> bool {
    if a.is_relocating() || b.is_relocating() || cooldowns.is_cooling(a.id, b.id, now) {
        return false;
    }
    // Normal points from a to b.
    let Some(contact) = circle_contact(b.body.pos, b.body.radius, a.body.pos, a.body.radius) else {
        return false;
    };
    let n = contact.normal;

    let push = n * (contact.depth / 2.0 + 2.0);
    a.body.pos -= push;
    b.body.pos += push;

    // Positive when b is already moving away from a along n.
    let separating = (b.body.vel - a.body.vel).dot(n);
    if separating > 0.0 {
        return false;
    }

    let impulse = -(1.0 + config.player_restitution) * separating / 2.0;
    a.body.vel -= n * impulse;
    b.body.vel += n * impulse;

    a.body.wake_if_fast(config.stop_threshold);
    b.body.wake_if_fast(config.stop_threshold);
    cooldowns.mark(a.id, b.id, now);
    true
}

/// Body against an immovable post: push out, reflect only the inward
/// component scaled by `bounce`. Returns whether they touched.
pub fn body_vs_post(body: &mut MovingBody, post: &GoalPost, bounce: f32) -> bool {
    let Some(contact) = circle_contact(body.pos, body.radius, post.pos, post.radius) else {
        return false;
    };
    let n = contact.normal;
    body.pos += n * (contact.depth + 2.0);

    let inward = body.vel.dot(n);
    if inward < 0.0 {
        body.vel -= n * (bounce * inward);
    }
    true
}

/// One full collision pass, in fixed order: ball/players, ball/posts,
/// players/posts, then every player pair `i < j`.
pub fn resolve_all(
    ball: &mut Ball,
    players: &mut [Player],
    posts: &[GoalPost],
    cooldowns: &mut CooldownTable,
    now: Millis,
    config: &MatchConfig,
) {
    for player in players.iter_mut() {
        ball_vs_player(ball, player, config);
    }

    for post in posts {
        if body_vs_post(&mut ball.body, post, config.post_bounce) {
            ball.engage();
        }
    }

    for player in players.iter_mut().filter(|p| !p.is_relocating()) {
        for post in posts {
            body_vs_post(&mut player.body, post, config.post_bounce);
        }
    }

    for i in 0..players.len() {
        let (head, tail) = players.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            player_vs_player(a, b, cooldowns, now, config);
        }
    }
}
