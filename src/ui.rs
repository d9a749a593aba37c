// Embedded leaderboard viewer page, served at /ui.

pub const UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Snake Leaderboard</title>
<style>
  body {
    font-family: "Consolas", "Menlo", monospace;
    background: #1c212b;
    color: #f5f7fc;
    margin: 0;
    padding: 2rem;
  }
  h1 { color: #5ad686; margin-top: 0; }
  #search {
    width: 100%;
    max-width: 24rem;
    padding: 0.6rem 0.8rem;
    border-radius: 10px;
    border: 1px solid #2c3342;
    background: #1e2430;
    color: #f5f7fc;
    font: inherit;
    margin-bottom: 1.5rem;
  }
  .card {
    display: flex;
    justify-content: space-between;
    align-items: baseline;
    max-width: 24rem;
    background: #1e2430;
    border: 1px solid #2c3342;
    border-radius: 10px;
    padding: 0.8rem 1rem;
    margin-bottom: 0.6rem;
  }
  .rank { color: #fcc419; margin-right: 0.8rem; }
  .score { color: #5ad686; font-weight: bold; }
  .date { color: #8a93a6; font-size: 0.8rem; }
  .empty { color: #8a93a6; }
</style>
</head>
<body>
<h1>Snake Leaderboard</h1>
<input id="search" type="text" placeholder="Filter by player name..." autocomplete="off">
<div id="board"><p class="empty">Loading...</p></div>
<script>
  const board = document.getElementById('board');
  const search = document.getElementById('search');
  let debounce = null;

  async function refresh() {
    const q = search.value.trim();
    const url = q ? '/leaderboard/?q=' + encodeURIComponent(q) : '/leaderboard/';
    try {
      const res = await fetch(url);
      const entries = await res.json();
      render(entries);
    } catch (e) {
      board.innerHTML = '<p class="empty">Leaderboard unavailable</p>';
    }
  }

  function render(entries) {
    if (entries.length === 0) {
      board.innerHTML = '<p class="empty">No scores yet</p>';
      return;
    }
    board.innerHTML = entries.map((e, i) =>
      '<div class="card">' +
        '<span><span class="rank">#' + (i + 1) + '</span>' + escapeHtml(e.player) + '</span>' +
        '<span><span class="score">' + e.score + '</span> ' +
        '<span class="date">' + e.date.replace('T', ' ') + '</span></span>' +
      '</div>'
    ).join('');
  }

  function escapeHtml(s) {
    const div = document.createElement('div');
    div.textContent = s;
    return div.innerHTML;
  }

  search.addEventListener('input', () => {
    clearTimeout(debounce);
    debounce = setTimeout(refresh, 300);
  });

  refresh();
  setInterval(refresh, 5000);
</script>
</body>
</html>
"#;
