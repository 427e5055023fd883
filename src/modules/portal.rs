//! Portal page.
//!
//! The whole front end is one static page served from memory; no asset
//! pipeline, no templates. The page talks to the check API with plain
//! `fetch` and renders verdicts by building DOM nodes, so contract-supplied
//! strings such as the lock name are never interpreted as markup.
//!
//! At most one check is in flight: while a run is pending the trigger stays
//! disabled no matter how the field changes. A stale response from an
//! abandoned check must never repaint the form: every run gets a sequence
//! number and only the latest run may touch the result area. Reset bumps
//! the sequence, which orphans any in-flight request.

use axum::response::Html;

const PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>NFT Ticket Checker</title>
<style>
  body { font-family: system-ui, sans-serif; background: #f5f6f8; margin: 0; }
  .container { max-width: 28rem; margin: 3rem auto; padding: 2rem; background: #fff;
               border-radius: 8px; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.1); text-align: center; }
  h1 { font-size: 1.5rem; }
  .wallet-input { width: 100%; box-sizing: border-box; padding: 0.6rem; font-size: 0.95rem;
                  border: 1px solid #ccc; border-radius: 4px; }
  .button-group { margin-top: 1rem; display: flex; gap: 0.5rem; justify-content: center; }
  button { padding: 0.5rem 1.2rem; font-size: 0.95rem; border: none; border-radius: 4px;
           cursor: pointer; }
  button:disabled { opacity: 0.5; cursor: default; }
  .validate-button { background: #2563eb; color: #fff; }
  .reset-button { background: #e5e7eb; }
  .purchase-button { background: #16a34a; color: #fff; margin-top: 0.5rem; }
  .pending { color: #555; }
  .error-message { color: #b91c1c; }
  .valid { color: #16a34a; font-weight: 600; }
  .invalid { color: #b91c1c; font-weight: 600; }
  .details { color: #374151; font-size: 0.9rem; }
  .info-box { margin-top: 2rem; padding: 1rem; background: #f9fafb; border-radius: 6px;
              font-size: 0.85rem; text-align: left; }
  .info-box h3 { margin: 0 0 0.5rem; font-size: 0.95rem; }
  .info-box p { margin: 0.2rem 0; word-break: break-all; }
  .support-container { margin-top: 1.5rem; font-size: 0.85rem; color: #6b7280; }
</style>
</head>
<body>
<div class="container">
  <h1>NFT Ticket Checker</h1>
  <input type="text" id="wallet-input" class="wallet-input"
         placeholder="Enter Wallet Address" autocomplete="off">
  <div class="button-group">
    <button id="validate-button" class="validate-button" disabled>Validate Ticket</button>
    <button id="reset-button" class="reset-button">Reset</button>
  </div>
  <div id="result"></div>
  <div class="info-box">
    <h3>Contract Information</h3>
    <p>Lock Contract: <span id="lock-address"></span></p>
    <p>Network: <span id="network"></span></p>
  </div>
  <div class="support-container">
    <p>Need help? <a id="support-link" href="">Contact Support</a></p>
  </div>
</div>
<script>
(function () {
  var input = document.getElementById("wallet-input");
  var validateButton = document.getElementById("validate-button");
  var resetButton = document.getElementById("reset-button");
  var result = document.getElementById("result");
  var runSeq = 0;
  var busy = false;

  function addLine(className, text) {
    var p = document.createElement("p");
    p.className = className;
    p.textContent = text;
    result.appendChild(p);
  }

  function clearResult() {
    result.textContent = "";
  }

  function setBusy(next) {
    busy = next;
    validateButton.disabled = busy || input.value.trim() === "";
    resetButton.disabled = busy;
    validateButton.textContent = busy ? "Checking..." : "Validate Ticket";
  }

  function renderOutcome(body) {
    clearResult();
    if (body.valid) {
      addLine("valid", "✅ Valid Ticket!");
      if (body.details) {
        var parts = [];
        if (body.details.lockName) { parts.push(body.details.lockName); }
        if (body.details.expiresAt) {
          parts.push("valid until " + new Date(body.details.expiresAt * 1000).toLocaleString());
        }
        if (parts.length) { addLine("details", parts.join(" · ")); }
      }
      return;
    }
    if (body.diagnostic) { addLine("error-message", body.diagnostic); }
    addLine("invalid", "❌ Invalid Ticket!");
    if (body.purchaseUrl) {
      var buy = document.createElement("button");
      buy.className = "purchase-button";
      buy.textContent = "Purchase Ticket";
      buy.addEventListener("click", function () { window.open(body.purchaseUrl, "_blank"); });
      result.appendChild(buy);
    }
  }

  function check() {
    var seq = ++runSeq;
    setBusy(true);
    clearResult();
    addLine("pending", "Checking ticket validity...");
    fetch("/api/v1/check", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ address: input.value })
    })
      .then(function (response) {
        return response.json().then(function (body) {
          if (seq !== runSeq) { return; }
          if (response.ok) {
            renderOutcome(body);
          } else {
            clearResult();
            addLine("error-message", body.message || "Error: request failed");
          }
        });
      })
      .catch(function () {
        if (seq !== runSeq) { return; }
        clearResult();
        addLine("error-message", "Network connection error - please try again");
      })
      .then(function () {
        if (seq === runSeq) { setBusy(false); }
      });
  }

  function reset() {
    runSeq++;
    input.value = "";
    clearResult();
    setBusy(false);
  }

  validateButton.addEventListener("click", check);
  resetButton.addEventListener("click", reset);
  input.addEventListener("input", function () {
    validateButton.disabled = busy || input.value.trim() === "";
  });
  input.addEventListener("keydown", function (event) {
    if (event.key === "Enter" && !validateButton.disabled) { check(); }
  });

  fetch("/api/v1/gate")
    .then(function (response) { return response.json(); })
    .then(function (info) {
      document.getElementById("lock-address").textContent = info.lockAddress;
      document.getElementById("network").textContent = info.network;
      document.getElementById("support-link").href = "mailto:" + info.supportEmail;
    })
    .catch(function () {});
})();
</script>
</body>
</html>
"##;

/// GET /
/// The check form; everything dynamic comes from the JSON API
pub async fn serve_page() -> Html<&'static str> {
    Html(PAGE)
}
