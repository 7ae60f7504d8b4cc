use chrono::{NaiveDate, Weekday};

pub fn render_index(today: NaiveDate, week_start: Weekday) -> String {
    let day_labels = match week_start {
        Weekday::Mon => "['M','','W','','F','','']",
        _ => "['','M','','W','','F','']",
    };
    INDEX_HTML
        .replace("{{TODAY}}", &today.format("%A, %B %-d, %Y").to_string())
        .replace("{{DAY_LABELS}}", day_labels)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>HabitForge</title>
  <style>
    :root {
      --bg: #f4f6f8;
      --ink: #1f2933;
      --muted: #6b7785;
      --card: #ffffff;
      --accent: #2563eb;
      --danger: #dc2626;
      --shadow: 0 12px 32px rgba(31, 41, 51, 0.08);
      --heat-0: #e5e7eb;
      --heat-1: #bbf7d0;
      --heat-2: #4ade80;
      --heat-3: #16a34a;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 18px 28px;
      background: var(--card);
      box-shadow: var(--shadow);
    }

    header h1 {
      margin: 0;
      font-size: 1.5rem;
    }

    main {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 28px 18px 48px;
      display: grid;
      gap: 24px;
    }

    section {
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 22px;
    }

    h2 {
      margin: 0 0 14px;
      font-size: 1.15rem;
    }

    .muted {
      color: var(--muted);
    }

    .badges {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 12px;
    }

    .badge {
      border: 1px solid #e5e7eb;
      border-radius: 12px;
      padding: 12px;
      opacity: 0.45;
    }

    .badge.unlocked {
      opacity: 1;
      border-color: var(--badge-color);
    }

    .badge .dot {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 50%;
      background: var(--badge-color);
      margin-right: 6px;
    }

    .heatmap {
      display: flex;
      gap: 3px;
      overflow-x: auto;
      padding-bottom: 6px;
    }

    .week {
      display: grid;
      grid-template-rows: repeat(7, 12px);
      gap: 3px;
    }

    .cell {
      width: 12px;
      height: 12px;
      border-radius: 2px;
      background: var(--heat-0);
    }

    .cell.placeholder {
      background: transparent;
    }

    .cell.level-1 { background: var(--heat-1); }
    .cell.level-2 { background: var(--heat-2); }
    .cell.level-3 { background: var(--heat-3); }

    .day-labels {
      display: grid;
      grid-template-rows: repeat(7, 12px);
      gap: 3px;
      font-size: 0.65rem;
      color: var(--muted);
      margin-right: 4px;
    }

    .months {
      display: flex;
      font-size: 0.7rem;
      color: var(--muted);
      margin: 0 0 4px 18px;
      position: relative;
      height: 14px;
    }

    .months span {
      position: absolute;
    }

    .legend {
      display: flex;
      align-items: center;
      gap: 4px;
      font-size: 0.75rem;
      color: var(--muted);
      margin-top: 8px;
    }

    .habits {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
      gap: 16px;
    }

    .habit {
      border: 1px solid #e5e7eb;
      border-radius: 14px;
      padding: 16px;
      display: grid;
      gap: 10px;
    }

    .habit-head {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
    }

    .streak {
      font-size: 2rem;
      font-weight: 700;
    }

    .streak.cold { color: var(--muted); }
    .streak.warming { color: #3b82f6; }
    .streak.strong { color: #22c55e; }
    .streak.legendary { color: #eab308; }

    .progress {
      height: 8px;
      border-radius: 999px;
      background: #e5e7eb;
      overflow: hidden;
    }

    .progress span {
      display: block;
      height: 100%;
      background: var(--muted);
    }

    .progress .medium { background: #eab308; }
    .progress .high { background: #3b82f6; }
    .progress .complete { background: #22c55e; }

    button {
      border: none;
      border-radius: 10px;
      padding: 8px 14px;
      font: inherit;
      cursor: pointer;
      background: var(--accent);
      color: #fff;
    }

    button.ghost {
      background: transparent;
      color: var(--muted);
      padding: 4px 8px;
    }

    button:disabled {
      background: #cbd5e1;
      cursor: default;
    }

    form.new-habit {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
      margin-bottom: 16px;
    }

    form.new-habit input,
    form.new-habit select {
      padding: 8px 10px;
      border: 1px solid #cbd5e1;
      border-radius: 10px;
      font: inherit;
    }

    .toast {
      position: fixed;
      right: 20px;
      bottom: 20px;
      padding: 12px 16px;
      border-radius: 12px;
      background: var(--ink);
      color: #fff;
      box-shadow: var(--shadow);
      opacity: 0;
      transition: opacity 200ms ease;
    }

    .toast.show {
      opacity: 1;
    }

    .toast.error {
      background: var(--danger);
    }
  </style>
</head>
<body>
  <header>
    <h1>HabitForge</h1>
    <span class="muted">{{TODAY}}</span>
  </header>

  <main>
    <section>
      <h2>Welcome back!</h2>
      <p class="muted" id="welcome">Loading...</p>
    </section>

    <section>
      <h2>Achievements <span class="muted" id="badge-count"></span></h2>
      <div class="badges" id="badges"></div>
    </section>

    <section>
      <h2>Activity Heatmap - <span id="heatmap-year"></span></h2>
      <div class="months" id="months"></div>
      <div style="display: flex;">
        <div class="day-labels" id="day-labels"></div>
        <div class="heatmap" id="heatmap"></div>
      </div>
      <div class="legend">
        <span>Less</span>
        <div class="cell"></div>
        <div class="cell level-1"></div>
        <div class="cell level-2"></div>
        <div class="cell level-3"></div>
        <span>More</span>
      </div>
    </section>

    <section>
      <h2>Your Habits</h2>
      <form class="new-habit" id="new-habit">
        <input name="name" placeholder="e.g. Morning run" maxlength="100" required />
        <select name="goal_type">
          <option value="daily">Daily</option>
          <option value="weekly">Weekly</option>
        </select>
        <button type="submit">Add Habit</button>
      </form>
      <div class="habits" id="habits"></div>
    </section>
  </main>

  <div class="toast" id="toast"></div>

  <script>
    const DAY_LABELS = {{DAY_LABELS}};
    const CELL_STRIDE = 15;

    function toast(message, isError) {
      const el = document.getElementById('toast');
      el.textContent = message;
      el.className = 'toast show' + (isError ? ' error' : '');
      clearTimeout(el._timer);
      el._timer = setTimeout(() => { el.className = 'toast'; }, 2600);
    }

    async function api(path, options) {
      const res = await fetch(path, Object.assign({
        headers: { 'Content-Type': 'application/json' },
      }, options));
      if (!res.ok) {
        throw new Error(await res.text() || res.statusText);
      }
      return res.status === 204 ? null : res.json();
    }

    function announce(unlocked) {
      for (const badge of unlocked || []) {
        toast('New Badge Unlocked! You earned "' + badge.title + '"');
      }
    }

    function renderBadges(shelf) {
      document.getElementById('badge-count').textContent =
        '(' + shelf.unlocked_count + '/' + shelf.total + ')';
      const root = document.getElementById('badges');
      root.innerHTML = '';
      for (const badge of shelf.badges) {
        const el = document.createElement('div');
        el.className = 'badge' + (badge.unlocked ? ' unlocked' : '');
        el.style.setProperty('--badge-color', badge.color);
        const when = badge.unlocked_at
          ? 'Unlocked ' + new Date(badge.unlocked_at).toLocaleDateString()
          : 'Locked';
        el.innerHTML = '<strong><span class="dot"></span></strong><div class="muted"></div><small class="muted"></small>';
        el.querySelector('strong').append(badge.title);
        el.querySelector('div').textContent = badge.description;
        el.querySelector('small').textContent = when;
        root.appendChild(el);
      }
    }

    function renderHeatmap(grid) {
      document.getElementById('heatmap-year').textContent = grid.year;
      const labels = document.getElementById('day-labels');
      labels.innerHTML = '';
      for (const label of DAY_LABELS) {
        const el = document.createElement('div');
        el.textContent = label;
        labels.appendChild(el);
      }

      const months = document.getElementById('months');
      months.innerHTML = '';
      grid.months.forEach((month, index) => {
        if (index % 2 !== 0) return;
        const el = document.createElement('span');
        el.textContent = month.label;
        el.style.left = (month.week * CELL_STRIDE) + 'px';
        months.appendChild(el);
      });

      const root = document.getElementById('heatmap');
      root.innerHTML = '';
      for (const week of grid.weeks) {
        const column = document.createElement('div');
        column.className = 'week';
        for (const day of week) {
          const cell = document.createElement('div');
          if (day.date === null) {
            cell.className = 'cell placeholder';
          } else {
            cell.className = 'cell level-' + day.level;
            cell.title = day.label;
          }
          column.appendChild(cell);
        }
        root.appendChild(column);
      }
    }

    function renderHabits(habits) {
      const count = habits.length;
      document.getElementById('welcome').textContent =
        "Keep building those habits. You've got " + count + ' habit' + (count !== 1 ? 's' : '') + ' to work on.';

      const root = document.getElementById('habits');
      root.innerHTML = '';
      if (count === 0) {
        root.innerHTML = '<p class="muted">No habits yet. Create your first habit to start building better routines!</p>';
        return;
      }

      for (const habit of habits) {
        const s = habit.summary;
        const card = document.createElement('div');
        card.className = 'habit';
        card.innerHTML =
          '<div class="habit-head"><strong class="name"></strong>' +
          '<span><button class="ghost edit">Edit</button><button class="ghost delete">Delete</button></span></div>' +
          '<small class="muted goal"></small>' +
          '<div><span class="streak ' + s.streak_tier + '">' + s.streak + '</span> ' +
          '<span class="muted">day' + (s.streak !== 1 ? 's' : '') + ' streak</span></div>' +
          '<button class="check"></button>';
        card.querySelector('.name').textContent = habit.name;
        card.querySelector('.goal').textContent =
          habit.goal_type + ' - since ' + new Date(habit.created_at).toLocaleDateString();

        if (habit.goal_type === 'weekly') {
          const progress = document.createElement('div');
          progress.innerHTML = '<small class="muted">This week: ' + Math.round(s.weekly_progress) + '%</small>' +
            '<div class="progress"><span class="' + s.progress_tier + '" style="width:' + s.weekly_progress + '%"></span></div>';
          card.insertBefore(progress, card.querySelector('.check'));
        }

        const check = card.querySelector('.check');
        check.textContent = s.checked_today ? 'Done' : 'Check In';
        check.disabled = s.checked_today;
        check.addEventListener('click', () => checkIn(habit.id, check));
        card.querySelector('.edit').addEventListener('click', () => editHabit(habit));
        card.querySelector('.delete').addEventListener('click', () => deleteHabit(habit));
        root.appendChild(card);
      }
    }

    async function refresh() {
      try {
        const dashboard = await api('/api/dashboard');
        renderBadges(dashboard.badges);
        renderHeatmap(dashboard.heatmap);
        renderHabits(dashboard.habits);
      } catch (err) {
        toast(err.message, true);
      }
    }

    async function checkIn(id, button) {
      button.disabled = true;
      button.textContent = '...';
      try {
        const result = await api('/api/habits/' + id + '/checkins', { method: 'POST', body: '{}' });
        toast('Great job! Habit completed for today!');
        announce(result.unlocked);
      } catch (err) {
        toast(err.message, true);
      }
      refresh();
    }

    async function editHabit(habit) {
      const name = prompt('Habit name', habit.name);
      if (name === null || !name.trim()) return;
      const weekly = confirm('Track this habit weekly? (Cancel for daily)');
      try {
        await api('/api/habits/' + habit.id, {
          method: 'PUT',
          body: JSON.stringify({ name: name.trim(), goal_type: weekly ? 'weekly' : 'daily' }),
        });
        toast('Habit updated successfully!');
      } catch (err) {
        toast(err.message, true);
      }
      refresh();
    }

    async function deleteHabit(habit) {
      if (!confirm('Delete "' + habit.name + '" and all its check-ins?')) return;
      try {
        await api('/api/habits/' + habit.id, { method: 'DELETE' });
        toast('Habit has been removed successfully.');
      } catch (err) {
        toast(err.message, true);
      }
      refresh();
    }

    document.getElementById('new-habit').addEventListener('submit', async (event) => {
      event.preventDefault();
      const form = event.target;
      const name = form.name.value.trim();
      if (!name) return;
      try {
        const result = await api('/api/habits', {
          method: 'POST',
          body: JSON.stringify({ name, goal_type: form.goal_type.value }),
        });
        form.reset();
        toast('Habit created successfully!');
        announce(result.unlocked);
      } catch (err) {
        toast(err.message, true);
      }
      refresh();
    });

    refresh();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_fills_placeholders() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let html = render_index(today, Weekday::Sun);
        assert!(html.contains("Sunday, January 7, 2024"));
        assert!(html.contains("['','M','','W','','F','']"));
        assert!(!html.contains("{{"));
    }
}
